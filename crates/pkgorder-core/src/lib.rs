mod inventory;
mod package;

pub use inventory::{validate_unique_names, PackageInventory};
pub use package::Package;

#[cfg(test)]
mod tests;
