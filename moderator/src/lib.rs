mod console;
mod oracle;
mod recording;
mod table;
pub use console::*;
pub use oracle::*;
pub use recording::*;
pub use table::*;
