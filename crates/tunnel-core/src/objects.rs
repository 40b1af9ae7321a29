use glam::{Vec2, Vec3};

/// A pickable picture panel: an axis-aligned quad in the XY plane, visible
/// from both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractiveObject {
    pub id: usize,
    pub position: Vec3,
    pub half_size: Vec2,
}

impl InteractiveObject {
    pub fn new(id: usize, position: Vec3, size: Vec2) -> Self {
        Self {
            id,
            position,
            half_size: size * 0.5,
        }
    }
}

/// Append-only collection; objects are never moved or removed once registered.
#[derive(Clone, Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<InteractiveObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, object: InteractiveObject) {
        self.objects.push(object);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[InteractiveObject] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractiveObject> {
        self.objects.iter()
    }
}
