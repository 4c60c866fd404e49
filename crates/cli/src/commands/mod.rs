pub mod baseline;
pub mod check;
pub mod init;
pub mod show;
pub mod util;
pub mod watch;

pub use baseline::*;
pub use check::*;
pub use init::*;
pub use show::*;
pub use util::*;
pub use watch::*;
