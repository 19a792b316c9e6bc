// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene seam
//!
//! The frame engine never renders. It hands finished beams to a [`Scene`]
//! and later asks for them back, releasing whatever GPU-side resources the
//! scene allocated for them.

use crate::beam::BeamPrimitive;
use slotmap::{new_key_type, SlotMap};

/// Receiver of frame beams
pub trait Scene {
    /// Stable reference to an added beam
    type Handle: Clone;

    fn add(&mut self, beam: BeamPrimitive) -> Self::Handle;

    /// Detach a beam. Unknown handles return `None`.
    fn remove(&mut self, handle: &Self::Handle) -> Option<BeamPrimitive>;

    /// Free the tessellated geometry of a removed beam
    fn release_geometry(&mut self, handle: &Self::Handle);

    /// Free the material of a removed beam
    fn release_material(&mut self, handle: &Self::Handle);
}

new_key_type! {
    /// Key for a beam held by a [`MemoryScene`].
    pub struct BeamKey;
}

/// In-memory scene that records releases
#[derive(Debug, Default)]
pub struct MemoryScene {
    beams: SlotMap<BeamKey, BeamPrimitive>,
    geometry_releases: usize,
    material_releases: usize,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    pub fn get(&self, key: BeamKey) -> Option<&BeamPrimitive> {
        self.beams.get(key)
    }

    pub fn contains(&self, key: BeamKey) -> bool {
        self.beams.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BeamKey, &BeamPrimitive)> {
        self.beams.iter()
    }

    pub fn beams(&self) -> impl Iterator<Item = &BeamPrimitive> {
        self.beams.values()
    }

    pub fn geometry_releases(&self) -> usize {
        self.geometry_releases
    }

    pub fn material_releases(&self) -> usize {
        self.material_releases
    }
}

impl Scene for MemoryScene {
    type Handle = BeamKey;

    fn add(&mut self, beam: BeamPrimitive) -> BeamKey {
        self.beams.insert(beam)
    }

    fn remove(&mut self, handle: &BeamKey) -> Option<BeamPrimitive> {
        self.beams.remove(*handle)
    }

    fn release_geometry(&mut self, _handle: &BeamKey) {
        self.geometry_releases += 1;
    }

    fn release_material(&mut self, _handle: &BeamKey) {
        self.material_releases += 1;
    }
}
