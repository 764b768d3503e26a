pub mod characteristics;
pub mod device;
