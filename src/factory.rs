//! Truecolor surface construction strategies.
//!
//! The decode path ends in a freshly constructed truecolor surface. When the
//! host's constructor is directly callable, [`DirectFactory`] calls it. When
//! the host only exposes constructors through its function table,
//! [`CallbackFactory`] resolves the named callable once per session and takes
//! sole ownership of every surface it produces, so no surface is ever
//! co-owned by the host's resource tracking and the bridge at the same time.

use crate::surface::Surface;
use crate::PlanarError;

#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use crate::host::{Constructor, HostRegistry};

/// Creates the truecolor surfaces the decode path writes into.
pub trait SurfaceFactory {
    /// Create a `width x height` truecolor surface.
    fn create(&self, width: u32, height: u32) -> Result<Surface, PlanarError>;
}

/// Direct strategy: construct the surface in-process.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectFactory;

impl SurfaceFactory for DirectFactory {
    fn create(&self, width: u32, height: u32) -> Result<Surface, PlanarError> {
        Surface::new_truecolor(width, height)
    }
}

/// Indirect strategy: a constructor resolved by name from a host's function
/// table.
///
/// Each value is one session's cache of the resolved callable, looked up once
/// in [`resolve`](CallbackFactory::resolve) and reused for every `create` in
/// the session. Sessions are isolated by ownership: dropping one, or
/// unregistering the constructor from the host, leaves other sessions'
/// cached handles intact. Surfaces the callable registers with the host are
/// immediately taken back out of the resource table, leaving the bridge as
/// sole owner.
#[cfg(feature = "std")]
pub struct CallbackFactory<'h> {
    host: &'h HostRegistry,
    constructor: Arc<Constructor>,
}

#[cfg(feature = "std")]
impl<'h> CallbackFactory<'h> {
    /// Resolve `name` in `host`'s function table and cache the callable for
    /// this session. Fails with `UnresolvedConstructor` if no such entry
    /// exists.
    pub fn resolve(host: &'h HostRegistry, name: &str) -> Result<Self, PlanarError> {
        let constructor = host.resolve(name)?;
        Ok(Self { host, constructor })
    }
}

#[cfg(feature = "std")]
impl SurfaceFactory for CallbackFactory<'_> {
    fn create(&self, width: u32, height: u32) -> Result<Surface, PlanarError> {
        let id = (self.constructor)(self.host, width, height)?;
        self.host.take(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_factory_builds_truecolor() {
        let surface = DirectFactory.create(6, 2).unwrap();
        assert!(surface.is_truecolor());
        assert_eq!((surface.width(), surface.height()), (6, 2));
    }

    #[test]
    fn direct_factory_is_usable_as_a_trait_object() {
        let factory: &dyn SurfaceFactory = &DirectFactory;
        assert!(factory.create(1, 1).is_ok());
    }

    #[cfg(feature = "std")]
    #[test]
    fn callback_factory_leaves_no_host_reference() {
        use crate::host::CREATE_TRUECOLOR;

        let host = HostRegistry::new();
        let factory = CallbackFactory::resolve(&host, CREATE_TRUECOLOR).unwrap();
        let surface = factory.create(3, 3).unwrap();
        assert_eq!((surface.width(), surface.height()), (3, 3));
        assert_eq!(host.tracked_surfaces(), 0);
    }
}
