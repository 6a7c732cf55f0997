mod scheduling;
mod utils;
