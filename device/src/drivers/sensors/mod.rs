pub mod bmp085;
