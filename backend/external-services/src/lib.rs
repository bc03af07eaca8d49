pub mod service;

pub use service::HttpXmlTransport;
