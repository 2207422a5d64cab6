pub mod image_io;

pub use image_io::{decode_image, decode_image_bytes, encode_png, save_image};
