pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod logging;
pub mod path;
pub mod resolver;
pub mod resource;

pub use config::ClasspathConfig;
pub use error::{Result, ScanError};
pub use locator::{ClasspathRoots, RootDescriptor, RootLocator, RootSource, StaticRoots};
pub use resolver::ResourceResolver;
pub use resource::Resource;
