use crate::common::error::Error;

pub type Result<T> = core::result::Result<T, Error>;
