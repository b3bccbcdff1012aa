pub mod fs_resource_store;
pub mod layout;
pub mod resource_store;
pub mod transient_resource_store;

pub use fs_resource_store::FsResourceStore;
pub use layout::StoreLayout;
pub use resource_store::ResourceStore;
pub use transient_resource_store::TransientResourceStore;
