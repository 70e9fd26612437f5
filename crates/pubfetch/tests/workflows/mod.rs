use super::*;

mod classification;
mod http;
