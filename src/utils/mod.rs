pub mod codec;
pub mod complexity;
pub mod judger;
pub mod poller;
