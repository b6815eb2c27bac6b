mod azure;
mod discovery;
mod dotnet;
mod qir;

pub use azure::AzureStrategy;
pub use dotnet::DotnetStrategy;
pub use qir::QirStrategy;
