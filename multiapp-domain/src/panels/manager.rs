use std::collections::HashMap;

use tracing::{debug, trace};

use multiapp_core::config::PanelConfig;
use multiapp_core::types::{Point, Rect, Size};

use crate::instance_registry::{Instance, InstanceId, LaunchMode, RegistryEvent};

use super::errors::PanelError;
use super::types::{Panel, PanelId};

/// Keeps the floating panels of `embeddedWebView` instances: placement,
/// stacking order, dragging and minimization.
///
/// Panels always stay inside the viewport. An instance has at most one panel.
#[derive(Debug)]
pub struct PanelManager {
    config: PanelConfig,
    panels: HashMap<PanelId, Panel>,
    // Bottom to top.
    stacking: Vec<PanelId>,
    // Pointer position relative to the panel origin at grab time.
    drags: HashMap<PanelId, Point>,
    next_panel_id: u64,
    cascade_step: i32,
}

impl PanelManager {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            panels: HashMap::new(),
            stacking: Vec::new(),
            drags: HashMap::new(),
            next_panel_id: 1,
            cascade_step: 0,
        }
    }

    pub fn viewport(&self) -> Rect {
        Rect::from_coords(0, 0, self.config.viewport_width, self.config.viewport_height)
    }

    /// Opens a panel for `instance`, or focuses the one it already has.
    pub fn open_for_instance(&mut self, instance: &Instance) -> Result<PanelId, PanelError> {
        if instance.mode() != LaunchMode::EmbeddedWebView {
            return Err(PanelError::UnsupportedMode {
                instance_id: instance.id(),
                mode: instance.mode(),
            });
        }
        let url = instance.web_url().ok_or(PanelError::MissingUrl(instance.id()))?;

        if let Some(existing) = self.panel_for_instance(instance.id()) {
            self.focus(existing)?;
            return Ok(existing);
        }

        let id = PanelId::new(self.next_panel_id);
        self.next_panel_id += 1;

        let panel = Panel {
            id,
            instance_id: instance.id(),
            title: instance.display_name().to_string(),
            url: url.to_string(),
            bounds: self.next_cascade_bounds(),
            z_index: 0,
            minimized: false,
        };
        debug!("Opening {} for instance {} at {:?}", id, instance.id(), panel.bounds);
        self.panels.insert(id, panel);
        self.stacking.push(id);
        self.restack();
        Ok(id)
    }

    fn next_cascade_bounds(&mut self) -> Rect {
        let size = Size::new(self.config.default_width, self.config.default_height);
        let viewport = self.viewport();
        let mut offset = self.cascade_step.saturating_mul(self.config.cascade_offset);
        if offset.saturating_add(size.width) > viewport.right() || offset.saturating_add(size.height) > viewport.bottom() {
            self.cascade_step = 0;
            offset = 0;
        }
        self.cascade_step += 1;
        Rect::new(Point::new(offset, offset), size).clamp_within(&viewport)
    }

    fn restack(&mut self) {
        for (index, id) in self.stacking.iter().enumerate() {
            if let Some(panel) = self.panels.get_mut(id) {
                panel.z_index = index as u32 + 1;
            }
        }
    }

    fn panel_mut(&mut self, id: PanelId) -> Result<&mut Panel, PanelError> {
        self.panels.get_mut(&id).ok_or(PanelError::NotFound(id))
    }

    /// Starts dragging `id` with the pointer at `pointer`. Also raises the panel.
    pub fn begin_drag(&mut self, id: PanelId, pointer: Point) -> Result<(), PanelError> {
        let grab = pointer.offset_from(self.panel_mut(id)?.bounds.origin);
        self.drags.insert(id, grab);
        self.focus(id)
    }

    /// Moves a dragged panel so the grab point follows `pointer`.
    pub fn drag_to(&mut self, id: PanelId, pointer: Point) -> Result<Rect, PanelError> {
        let grab = *self.drags.get(&id).ok_or(PanelError::NotDragging(id))?;
        let origin = pointer.offset_from(grab);
        trace!("Dragging {} to {:?}", id, origin);
        self.move_to(id, origin)
    }

    pub fn end_drag(&mut self, id: PanelId) -> Result<(), PanelError> {
        self.panel_mut(id)?;
        self.drags.remove(&id).map(|_| ()).ok_or(PanelError::NotDragging(id))
    }

    /// Moves the panel's origin, keeping it inside the viewport.
    pub fn move_to(&mut self, id: PanelId, origin: Point) -> Result<Rect, PanelError> {
        let viewport = self.viewport();
        let panel = self.panel_mut(id)?;
        panel.bounds = Rect::new(origin, panel.bounds.size).clamp_within(&viewport);
        Ok(panel.bounds)
    }

    /// Resizes the panel, enforcing the minimum size and the viewport.
    pub fn resize(&mut self, id: PanelId, size: Size) -> Result<Rect, PanelError> {
        let viewport = self.viewport();
        let min = Size::new(self.config.min_width, self.config.min_height);
        let panel = self.panel_mut(id)?;
        let size = Size::new(size.width.max(min.width), size.height.max(min.height));
        panel.bounds = Rect::new(panel.bounds.origin, size).clamp_within(&viewport);
        Ok(panel.bounds)
    }

    /// Raises the panel to the top of the stack.
    pub fn focus(&mut self, id: PanelId) -> Result<(), PanelError> {
        let position = self
            .stacking
            .iter()
            .position(|existing| *existing == id)
            .ok_or(PanelError::NotFound(id))?;
        if position + 1 != self.stacking.len() {
            self.stacking.remove(position);
            self.stacking.push(id);
            self.restack();
        }
        Ok(())
    }

    /// Flips the minimized flag and returns the new value.
    pub fn toggle_minimized(&mut self, id: PanelId) -> Result<bool, PanelError> {
        let panel = self.panel_mut(id)?;
        panel.minimized = !panel.minimized;
        Ok(panel.minimized)
    }

    pub fn close(&mut self, id: PanelId) -> Result<Panel, PanelError> {
        let panel = self.panels.remove(&id).ok_or(PanelError::NotFound(id))?;
        self.stacking.retain(|existing| *existing != id);
        self.drags.remove(&id);
        if self.panels.is_empty() {
            self.cascade_step = 0;
        }
        self.restack();
        debug!("Closed {} of instance {}", id, panel.instance_id);
        Ok(panel)
    }

    /// Closes the panel of `instance_id`, if it has one.
    pub fn close_for_instance(&mut self, instance_id: InstanceId) -> bool {
        match self.panel_for_instance(instance_id) {
            Some(id) => self.close(id).is_ok(),
            None => false,
        }
    }

    pub fn panel_for_instance(&self, instance_id: InstanceId) -> Option<PanelId> {
        self.panels
            .values()
            .find(|panel| panel.instance_id == instance_id)
            .map(|panel| panel.id)
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    /// All panels, bottom to top.
    pub fn list(&self) -> Vec<Panel> {
        self.stacking
            .iter()
            .filter_map(|id| self.panels.get(id).cloned())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.panels.len()
    }

    /// Closes the panels of instances that left the registry. Returns how
    /// many panels were closed.
    pub fn apply_registry_event(&mut self, event: &RegistryEvent) -> usize {
        match event {
            RegistryEvent::InstanceRemoved { id } => usize::from(self.close_for_instance(*id)),
            RegistryEvent::InstancesCleared { ids } => {
                ids.iter().filter(|id| self.close_for_instance(**id)).count()
            }
            _ => 0,
        }
    }
}
