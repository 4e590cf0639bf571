use std::{path::Path, sync::Arc};

/// Shared, immutable string. Cloning only bumps a reference count.
pub type ArcStr = Arc<str>;

/// Shared, immutable filesystem path.
pub type ArcPath = Arc<Path>;
