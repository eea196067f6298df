pub mod award;
pub mod interaction;
