//! Fault containment for decorative subtrees.
//!
//! A failed or unsupported 3D element is swapped for a flat illustration and
//! logged. Siblings never see the failure.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsSupport {
    #[default]
    Available,
    Unavailable,
}

/// Flat stand-in drawn where a 3D element would have been.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticIllustration {
    pub name: &'static str,
}

#[derive(Debug, Clone)]
pub enum Contained<T> {
    Mounted(T),
    Fallback(StaticIllustration),
}

impl<T> Contained<T> {
    /// Run `init`; on failure log and fall back.
    pub fn mount(name: &'static str, init: impl FnOnce() -> Result<T, SceneError>) -> Self {
        match init() {
            Ok(value) => Contained::Mounted(value),
            Err(error) => {
                tracing::error!(
                    element = name,
                    %error,
                    "decorative element failed, showing fallback"
                );
                Contained::Fallback(StaticIllustration { name })
            }
        }
    }

    /// Like [`Contained::mount`], but skips `init` entirely without graphics.
    pub fn mount_3d(
        name: &'static str,
        graphics: GraphicsSupport,
        init: impl FnOnce() -> Result<T, SceneError>,
    ) -> Self {
        match graphics {
            GraphicsSupport::Available => Self::mount(name, init),
            GraphicsSupport::Unavailable => {
                tracing::info!(element = name, "no graphics support, showing static illustration");
                Contained::Fallback(StaticIllustration { name })
            }
        }
    }

    pub fn mounted(&self) -> Option<&T> {
        match self {
            Contained::Mounted(value) => Some(value),
            Contained::Fallback(_) => None,
        }
    }

    pub fn mounted_mut(&mut self) -> Option<&mut T> {
        match self {
            Contained::Mounted(value) => Some(value),
            Contained::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Contained::Fallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_init_falls_back_without_touching_siblings() {
        let sibling: Contained<u32> = Contained::mount("sibling", || Ok(7));
        let broken: Contained<u32> = Contained::mount("chip", || {
            Err(SceneError::Init {
                name: "chip",
                reason: "shader compile failed".into(),
            })
        });
        assert!(broken.is_fallback());
        assert_eq!(sibling.mounted(), Some(&7));
    }

    #[test]
    fn unavailable_graphics_never_runs_init() {
        let mut ran = false;
        let scene: Contained<()> = Contained::mount_3d("dice", GraphicsSupport::Unavailable, || {
            ran = true;
            Ok(())
        });
        assert!(!ran);
        assert!(matches!(scene, Contained::Fallback(StaticIllustration { name: "dice" })));
    }
}
