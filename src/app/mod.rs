// App layer: command runners and console presentation built on top of core operations.

pub mod asset_helper;
pub mod report;
