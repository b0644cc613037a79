//! Portal that renders by logging.
//!
//! Used by the demo binary and by hosts that drive rendering elsewhere but
//! still want the lifecycle traced.

use std::sync::Arc;

use crate::models::{OverlayId, OverlayKind};
use crate::traits::{OverlayElement, OverlaySurface, Portal, PortalHandle};

/// Logs every mount and attaches a logging surface right away.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPortal;

impl Portal for LogPortal {
    fn render(&self, container: &str, element: OverlayElement) -> Box<dyn PortalHandle> {
        tracing::info!(
            "mount {} {} '{}' into {} at z={}",
            element.kind,
            element.id,
            element.title,
            container,
            element.z_index
        );
        element.slot.attach(Arc::new(LogSurface {
            id: element.id,
            kind: element.kind,
        }));
        Box::new(LogPortalHandle {
            id: element.id,
            container: container.to_string(),
        })
    }
}

struct LogSurface {
    id: OverlayId,
    kind: OverlayKind,
}

impl OverlaySurface for LogSurface {
    fn set_open(&self, open: bool) {
        if open {
            tracing::info!("{} {} enter animation", self.kind, self.id);
        } else {
            tracing::info!("{} {} exit animation", self.kind, self.id);
        }
    }
}

struct LogPortalHandle {
    id: OverlayId,
    container: String,
}

impl PortalHandle for LogPortalHandle {
    fn destroy(&mut self) {
        tracing::info!("unmount {} from {}", self.id, self.container);
    }
}
