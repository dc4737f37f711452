//! The host environment boundary: function table and resource tracking.
//!
//! Models the two host facilities the bridge touches. The function table maps
//! names to registered callables (surface constructors) and is what
//! [`CallbackFactory`](crate::CallbackFactory) resolves against. The resource
//! table tracks surfaces under integer ids so a callable can hand its product
//! across the call boundary.
//!
//! Ownership rule: a surface lives in exactly one place. [`HostRegistry::take`]
//! moves a surface out of the resource table, which is how the bridge claims
//! sole ownership of a constructor-produced surface instead of sharing it
//! with the host's tracking.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::surface::Surface;
use crate::PlanarError;

/// Name the standard truecolor constructor is registered under.
pub const CREATE_TRUECOLOR: &str = "create_truecolor";

/// Signature of a constructor in the host's function table: it receives the
/// registry (to register what it creates) and the requested dimensions, and
/// returns the tracked id of the new surface.
pub type Constructor =
    dyn Fn(&HostRegistry, u32, u32) -> Result<SurfaceId, PlanarError> + Send + Sync;

/// Id of a surface tracked in the host's resource table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

/// A host's function table and surface-resource table.
///
/// Both tables are individually locked; sessions on different threads may
/// resolve, create and take concurrently.
pub struct HostRegistry {
    functions: RwLock<HashMap<String, Arc<Constructor>>>,
    resources: Mutex<HashMap<SurfaceId, Surface>>,
    next_id: AtomicU64,
}

impl HostRegistry {
    /// Registry with the standard [`CREATE_TRUECOLOR`] constructor
    /// pre-registered and no tracked surfaces.
    pub fn new() -> Self {
        let registry = Self {
            functions: RwLock::new(HashMap::new()),
            resources: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        };
        registry.register_constructor(CREATE_TRUECOLOR, |host, width, height| {
            let surface = Surface::new_truecolor(width, height)?;
            Ok(host.register_surface(surface))
        });
        registry
    }

    /// Register `constructor` under `name`, replacing any previous entry.
    pub fn register_constructor<F>(&self, name: &str, constructor: F)
    where
        F: Fn(&HostRegistry, u32, u32) -> Result<SurfaceId, PlanarError> + Send + Sync + 'static,
    {
        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), Arc::new(constructor));
    }

    /// Remove the constructor registered under `name`, reporting whether an
    /// entry existed. Sessions that already resolved it keep their handle.
    pub fn unregister_constructor(&self, name: &str) -> bool {
        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    /// Look up the constructor registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<Constructor>, PlanarError> {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| PlanarError::UnresolvedConstructor(name.to_owned()))
    }

    /// Track `surface` in the resource table and return its id.
    pub fn register_surface(&self, surface: Surface) -> SurfaceId {
        let id = SurfaceId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, surface);
        id
    }

    /// Move the surface with `id` out of the resource table. The caller
    /// becomes its sole owner; the host keeps no reference.
    pub fn take(&self, id: SurfaceId) -> Result<Surface, PlanarError> {
        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or_else(|| {
                PlanarError::InvalidSurface(format!("no tracked surface with id {}", id.0))
            })
    }

    /// Number of surfaces currently tracked.
    pub fn tracked_surfaces(&self) -> usize {
        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for HostRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HostRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let functions = self
            .functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("HostRegistry")
            .field("functions", &functions)
            .field("resources", &self.tracked_surfaces())
            .finish()
    }
}
