pub use pairs::*;

mod pairs;
