pub mod assets;
pub mod doubles;
pub mod messages;
pub mod reports;
pub mod tester;

pub use assets::TesterAssets;
pub use messages::Messages;
pub use tester::*;
