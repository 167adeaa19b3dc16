//! Move/rotate/scale/fade animation over a transform-like UI target.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::error::ReactorError;
use crate::reaction::Reaction;
use crate::reference::ReferencePoint;
use crate::settings::ReactionSettings;
use crate::value::Vec3;

pub const MOVE: &str = "move";
pub const ROTATE: &str = "rotate";
pub const SCALE: &str = "scale";
pub const FADE: &str = "fade";

/// Host-side state animated by a [`UiAnimation`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiTransform {
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub alpha: f32,
}

impl Default for UiTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            alpha: 1.0,
        }
    }
}

pub type UiTarget = Rc<RefCell<UiTransform>>;

macro_rules! bind_field {
    ($reaction:expr, $target:expr, $field:ident) => {{
        let get = Rc::clone($target);
        let set = Rc::clone($target);
        $reaction.bind(
            move || get.borrow().$field,
            move |v| set.borrow_mut().$field = v,
        );
    }};
}

/// Four reactions, all disabled until configured, bound to one target.
#[derive(Debug)]
pub struct UiAnimation {
    animation: Animation,
    target: UiTarget,
}

impl UiAnimation {
    pub fn new(name: impl Into<String>, target: UiTarget) -> Result<Self, ReactorError> {
        let mut move_r = Reaction::<Vec3>::default().with_enabled(false);
        bind_field!(move_r, &target, position);
        let mut rotate_r = Reaction::<Vec3>::default().with_enabled(false);
        bind_field!(rotate_r, &target, rotation);
        let mut scale_r = Reaction::<Vec3>::default().with_enabled(false);
        bind_field!(scale_r, &target, scale);
        let mut fade_r = Reaction::<f32>::default().with_enabled(false);
        bind_field!(fade_r, &target, alpha);

        let animation = Animation::new(name)
            .with_reaction(MOVE, move_r)?
            .with_reaction(ROTATE, rotate_r)?
            .with_reaction(SCALE, scale_r)?
            .with_reaction(FADE, fade_r)?;
        Ok(Self { animation, target })
    }

    /// Alpha from 0 up to the value captured at bind time.
    pub fn fade_in(target: UiTarget, settings: ReactionSettings) -> Result<Self, ReactorError> {
        let mut ui = Self::new("fade_in", target)?;
        ui.configure_fade(ReferencePoint::custom(0.0), ReferencePoint::start(), settings)?;
        Ok(ui)
    }

    /// Alpha from the live value down to 0.
    pub fn fade_out(target: UiTarget, settings: ReactionSettings) -> Result<Self, ReactorError> {
        let mut ui = Self::new("fade_out", target)?;
        ui.configure_fade(ReferencePoint::current(), ReferencePoint::custom(0.0), settings)?;
        Ok(ui)
    }

    /// Scale up from zero to the captured scale.
    pub fn pop_in(target: UiTarget, settings: ReactionSettings) -> Result<Self, ReactorError> {
        let mut ui = Self::new("pop_in", target)?;
        let scale = ui.scale_mut()?;
        scale.set_settings(settings)?;
        scale.from = ReferencePoint::custom(Vec3::ZERO);
        scale.to = ReferencePoint::start();
        scale.enabled = true;
        Ok(ui)
    }

    fn configure_fade(
        &mut self,
        from: ReferencePoint<f32>,
        to: ReferencePoint<f32>,
        settings: ReactionSettings,
    ) -> Result<(), ReactorError> {
        let fade = self.fade_mut()?;
        fade.set_settings(settings)?;
        fade.from = from;
        fade.to = to;
        fade.enabled = true;
        Ok(())
    }

    #[inline]
    pub fn target(&self) -> &UiTarget {
        &self.target
    }

    #[inline]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    #[inline]
    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    pub fn into_animation(self) -> Animation {
        self.animation
    }

    pub fn move_mut(&mut self) -> Result<&mut Reaction<Vec3>, ReactorError> {
        self.animation.vec3_mut(MOVE)
    }

    pub fn rotate_mut(&mut self) -> Result<&mut Reaction<Vec3>, ReactorError> {
        self.animation.vec3_mut(ROTATE)
    }

    pub fn scale_mut(&mut self) -> Result<&mut Reaction<Vec3>, ReactorError> {
        self.animation.vec3_mut(SCALE)
    }

    pub fn fade_mut(&mut self) -> Result<&mut Reaction<f32>, ReactorError> {
        self.animation.float_mut(FADE)
    }

    /// Capture the target's present state as the start value of every
    /// preset reaction still registered.
    pub fn capture_start_values(&mut self) {
        let t = *self.target.borrow();
        if let Ok(r) = self.move_mut() {
            r.set_start_value(t.position);
        }
        if let Ok(r) = self.rotate_mut() {
            r.set_start_value(t.rotation);
        }
        if let Ok(r) = self.scale_mut() {
            r.set_start_value(t.scale);
        }
        if let Ok(r) = self.fade_mut() {
            r.set_start_value(t.alpha);
        }
    }
}
