pub mod basic;
pub mod ec2;
pub mod errors;
pub mod traits;
pub mod types;

pub use basic::BasicHost;
pub use ec2::Ec2Host;
pub use errors::HostError;
pub use traits::Host;
pub use types::Socket;
