//! Scroll-and-recycle data structures.
//!
//! A scene owns a fixed pool of [`ScrollEntity`] values that are moved left
//! every tick and teleported back past the right edge when they leave the
//! viewport. Cloud tiles are grouped into [`CloudCluster`]s that reappear
//! together through a shared [`RespawnCache`].

use std::collections::HashMap;

/// Sprite drawn for a scrolling tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Ground,
    Grass,
    Water,
    ShallowWater,
    Cactus,
    CloudLeft,
    CloudCenter,
    CloudRight,
}

impl TileKind {
    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::CloudLeft | Self::CloudCenter | Self::CloudRight)
    }
}

/// Identifier shared by every tile of one cloud cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub u32);

/// One positioned visual element taking part in the scroll illusion.
///
/// Positions are sprite centers in world pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEntity {
    pub x: f64,
    pub y: f64,
    pub kind: TileKind,
    /// Set only for cloud tiles.
    pub cluster_id: Option<ClusterId>,
    /// First member of a cluster; generates the cluster's respawn position.
    pub is_anchor: bool,
}

impl ScrollEntity {
    /// A free-standing tile with no cluster membership.
    pub fn tile(x: f64, y: f64, kind: TileKind) -> Self {
        Self {
            x,
            y,
            kind,
            cluster_id: None,
            is_anchor: false,
        }
    }
}

/// Cloud cluster sizes (tile counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudSize {
    Small,
    Medium,
    Long,
}

impl CloudSize {
    pub const ALL: [CloudSize; 3] = [CloudSize::Small, CloudSize::Medium, CloudSize::Long];

    pub fn tile_count(&self) -> usize {
        match self {
            Self::Small => 3,
            Self::Medium => 4,
            Self::Long => 5,
        }
    }

    /// Left cap, center tiles, right cap.
    pub fn tiles(&self) -> Vec<TileKind> {
        let centers = self.tile_count() - 2;
        std::iter::once(TileKind::CloudLeft)
            .chain(std::iter::repeat(TileKind::CloudCenter).take(centers))
            .chain(std::iter::once(TileKind::CloudRight))
            .collect()
    }
}

/// A group of cloud tiles that moves and respawns as one unit.
#[derive(Debug, Clone)]
pub struct CloudCluster {
    pub id: ClusterId,
    pub size: CloudSize,
    /// Ordered left to right; `members[0]` is the anchor.
    pub members: Vec<ScrollEntity>,
}

impl CloudCluster {
    /// Lay out a cluster starting at (x, y), one tile step apart.
    pub fn new(id: ClusterId, size: CloudSize, x: f64, y: f64, step: f64) -> Self {
        let members = size
            .tiles()
            .into_iter()
            .enumerate()
            .map(|(i, kind)| ScrollEntity {
                x: x + step * i as f64,
                y,
                kind,
                cluster_id: Some(id),
                is_anchor: i == 0,
            })
            .collect();
        Self { id, size, members }
    }

    pub fn anchor(&self) -> &ScrollEntity {
        &self.members[0]
    }
}

/// Last generated respawn position per cluster.
///
/// Entries are overwritten whenever an anchor regenerates and are never
/// removed for the life of the scene.
#[derive(Debug, Clone, Default)]
pub struct RespawnCache {
    positions: HashMap<ClusterId, (f64, f64)>,
}

impl RespawnCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ClusterId) -> Option<(f64, f64)> {
        self.positions.get(&id).copied()
    }

    pub fn publish(&mut self, id: ClusterId, position: (f64, f64)) {
        self.positions.insert(id, position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Every scrolling pool in the scene.
#[derive(Debug, Clone)]
pub struct ScrollField {
    pub ground: Vec<ScrollEntity>,
    pub river: Vec<ScrollEntity>,
    /// The single obstacle the player must jump.
    pub obstacle: ScrollEntity,
    pub clouds: Vec<CloudCluster>,
    pub respawn_cache: RespawnCache,
    pub tile_speed: f64,
    pub cloud_speed: f64,
}

impl ScrollField {
    pub fn entity_count(&self) -> usize {
        self.ground.len()
            + self.river.len()
            + 1
            + self.clouds.iter().map(|c| c.members.len()).sum::<usize>()
    }
}
