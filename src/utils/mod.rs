//! Small helpers shared by the command line and the terminal client.

pub mod token;
