//! Render registration
//!
//! The host keeps one component per registered entity. Registration is keyed
//! by entity id, so registering an id twice replaces its component instead of
//! drawing it twice.

use std::collections::BTreeMap;

use glam::Vec2;

use super::drawable::Drawable;

/// What the host needs to draw one entity
#[derive(Debug, Clone, PartialEq)]
pub struct RenderComponent {
    pub drawable: Drawable,
    /// Top-left corner in world pixels (screen pixels when `screen_space`)
    pub pos: Vec2,
    /// Layer; higher draws on top
    pub z: f32,
    /// Drawn without the camera transform (HUD)
    pub screen_space: bool,
}

impl RenderComponent {
    pub fn world(drawable: Drawable, pos: Vec2, z: f32) -> Self {
        Self {
            drawable,
            pos,
            z,
            screen_space: false,
        }
    }

    pub fn hud(drawable: Drawable, pos: Vec2, z: f32) -> Self {
        Self {
            drawable,
            pos,
            z,
            screen_space: true,
        }
    }
}

/// Registered drawables, iterated in entity-id order
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    items: BTreeMap<u32, RenderComponent>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity. Returns true if it was already registered and its
    /// component got replaced.
    pub fn add(&mut self, id: u32, component: RenderComponent) -> bool {
        let replaced = self.items.insert(id, component).is_some();
        if replaced {
            log::debug!("render entity {} re-registered", id);
        }
        replaced
    }

    /// Unregister an entity
    pub fn remove(&mut self, id: u32) -> Option<RenderComponent> {
        self.items.remove(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: u32) -> Option<&RenderComponent> {
        self.items.get(&id)
    }

    /// Refresh drawable and position of an entity that is still registered.
    /// Unregistered ids are ignored.
    pub fn update(&mut self, id: u32, drawable: Drawable, pos: Vec2) {
        if let Some(item) = self.items.get_mut(&id) {
            item.drawable = drawable;
            item.pos = pos;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Components sorted back to front (z, then id)
    pub fn draw_order(&self) -> Vec<(u32, &RenderComponent)> {
        let mut order: Vec<_> = self.items.iter().map(|(&id, c)| (id, c)).collect();
        order.sort_by(|a, b| a.1.z.total_cmp(&b.1.z).then(a.0.cmp(&b.0)));
        order
    }

    /// Number of components showing a degraded drawable
    pub fn missing_count(&self) -> usize {
        self.items
            .values()
            .filter(|c| c.drawable.is_missing())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Drawable {
        Drawable::Text {
            text: s.to_string(),
            size: 40.0,
        }
    }

    #[test]
    fn test_add_same_id_replaces() {
        let mut list = RenderList::new();
        assert!(!list.add(7, RenderComponent::hud(text("A"), Vec2::ZERO, 10.0)));
        assert!(list.add(7, RenderComponent::hud(text("B"), Vec2::ZERO, 10.0)));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(7).map(|c| &c.drawable), Some(&text("B")));
    }

    #[test]
    fn test_update_ignores_unregistered() {
        let mut list = RenderList::new();
        list.update(3, Drawable::Missing, Vec2::new(5.0, 5.0));
        assert!(list.is_empty());

        list.add(3, RenderComponent::world(text("x"), Vec2::ZERO, 0.0));
        list.update(3, Drawable::Missing, Vec2::new(5.0, 5.0));
        let item = list.get(3).expect("registered");
        assert_eq!(item.pos, Vec2::new(5.0, 5.0));
        assert_eq!(list.missing_count(), 1);

        assert!(list.remove(3).is_some());
        assert!(!list.contains(3));
    }

    #[test]
    fn test_draw_order_by_z_then_id() {
        let mut list = RenderList::new();
        list.add(1, RenderComponent::world(Drawable::Missing, Vec2::ZERO, 7.0));
        list.add(2, RenderComponent::world(Drawable::Missing, Vec2::ZERO, 0.0));
        list.add(3, RenderComponent::world(Drawable::Missing, Vec2::ZERO, 0.0));
        list.add(4, RenderComponent::hud(Drawable::Missing, Vec2::ZERO, 10.0));

        let ids: Vec<u32> = list.draw_order().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }
}
