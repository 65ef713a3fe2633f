//! Asset kinds, manifest resolution and bundle naming.

mod bundle;
mod kind;
mod resolve;

pub use bundle::{MinifiedBundle, bundle_name};
pub use kind::{AssetKind, AssetOrigin};
pub use resolve::{
    DEFAULT_LIBRARY_PREFIX, ResolvedAsset, asset_dir, qualify, resolve, resolve_manifest,
};
