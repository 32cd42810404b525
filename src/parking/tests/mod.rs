mod common;
mod floor;
