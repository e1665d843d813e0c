//! Portal Anchors and Frame Transfer
//!
//! A portal is a pair of named transforms in the level: an `origin` the
//! player approaches and a `destination` they come out of. Teleporting
//! re-expresses the player's planar offset from the origin in the
//! destination's frame, so walking in off-center comes out off-center by the
//! same amount. Height is handled separately by the teleport itself
//! (`preserve_height`), which is why the vertical axis is dropped here.
//!
//! All functions are pure; anchors come read-only from level geometry.

use glam::{Quat, Vec3};

/// A named world transform used as one endpoint of a portal pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// World position of the anchor.
    pub position: Vec3,
    /// World orientation of the anchor. The anchor faces its local -Z.
    pub orientation: Quat,
}

impl Anchor {
    /// Create an anchor from a position and orientation.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create an anchor facing a yaw angle, level pitch.
    ///
    /// Yaw follows the camera convention: 0 faces -Z and increases turning
    /// right, which is a rotation of `-yaw` about +Y in world space.
    pub fn from_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            orientation: Quat::from_rotation_y(-yaw),
        }
    }

    /// Express a world point in this anchor's local frame.
    #[inline]
    pub fn to_local(&self, world_point: Vec3) -> Vec3 {
        self.orientation.inverse() * (world_point - self.position)
    }

    /// Express a local point in world space.
    #[inline]
    pub fn to_world(&self, local_point: Vec3) -> Vec3 {
        self.position + self.orientation * local_point
    }

    /// The anchor's facing direction in world space (local -Z).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

/// The two endpoints of a portal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPair {
    /// The side the player enters from.
    pub origin: Anchor,
    /// The side the player comes out of.
    pub destination: Anchor,
}

impl AnchorPair {
    /// Create a pair from its two endpoints.
    pub fn new(origin: Anchor, destination: Anchor) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Map a world point through the pair. See [`map_through`].
    pub fn map(&self, world_point: Vec3) -> Vec3 {
        map_through(&self.origin, &self.destination, world_point)
    }

    /// Exit facing for a player at `world_point`. See [`exit_yaw`].
    pub fn yaw(&self, world_point: Vec3) -> Option<f32> {
        exit_yaw(&self.origin, &self.destination, world_point)
    }
}

/// Map a world point through a portal pair.
///
/// The point is inverse-transformed into the origin's local frame, its
/// vertical component is discarded (the teleport preserves height on its
/// own), and the remaining planar offset is re-expressed in the
/// destination's frame. Returns a world-space position.
pub fn map_through(origin: &Anchor, destination: &Anchor, world_point: Vec3) -> Vec3 {
    let mut local = origin.to_local(world_point);
    local.y = 0.0;
    destination.to_world(local)
}

/// Facing yaw for a player exiting the portal.
///
/// Constructs a point behind the destination by the player's horizontal
/// distance from the origin and yaws from that point toward the destination,
/// via `atan2` in the horizontal plane. The construction degenerates when the
/// player stands on the origin or the destination faces straight up or down;
/// `None` is returned and the caller keeps its current yaw.
pub fn exit_yaw(origin: &Anchor, destination: &Anchor, world_point: Vec3) -> Option<f32> {
    let mut offset = world_point - origin.position;
    offset.y = 0.0;
    let distance = offset.length();
    if distance < 1e-4 {
        return None;
    }

    let mut facing = destination.forward();
    facing.y = 0.0;
    if facing.length_squared() < 1e-8 {
        return None;
    }
    facing = facing.normalize();

    let behind = destination.position - facing * distance;
    let dir = destination.position - behind;
    if dir.length_squared() < 1e-8 {
        return None;
    }
    // Yaw 0 faces -Z, so the horizontal angle is atan2(x, -z).
    Some(dir.x.atan2(-dir.z))
}
