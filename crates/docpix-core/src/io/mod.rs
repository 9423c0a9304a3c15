pub mod crop;
pub mod extract;
pub mod folder;
pub mod image_io;
pub mod sniff;
