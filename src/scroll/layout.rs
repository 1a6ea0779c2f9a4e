//! Hard-coded scene layout: the fixed tile pools created once per scene.

use super::types::*;
use crate::core::constants::*;
use rand::Rng;

/// Clusters created per size, in creation order.
const CLOUD_COUNTS: [(CloudSize, usize); 3] = [
    (CloudSize::Small, 3),
    (CloudSize::Medium, 2),
    (CloudSize::Long, 2),
];

/// Lay out one row of tiles from x = 0 until the row overhangs the right
/// edge by [`ROW_OVERHANG`].
pub fn tile_row(y: f64, increment: f64, kind: TileKind) -> Vec<ScrollEntity> {
    let mut tiles = Vec::new();
    let mut x = 0.0;
    while x < VIEWPORT_WIDTH + ROW_OVERHANG {
        tiles.push(ScrollEntity::tile(x, y, kind));
        x += increment;
    }
    tiles
}

/// Three rows of ground topped by one row of grass.
pub fn ground_tiles() -> Vec<ScrollEntity> {
    let mut tiles = Vec::new();
    for row in 0..3 {
        tiles.extend(tile_row(
            GROUND_REF_Y - TILE_SIZE * row as f64,
            TILE_STEP,
            TileKind::Ground,
        ));
    }
    tiles.extend(tile_row(GRASS_Y, TILE_STEP, TileKind::Grass));
    tiles
}

/// Deep water along the bottom edge with shallow water above it.
pub fn river_tiles() -> Vec<ScrollEntity> {
    let mut tiles = tile_row(DEEP_WATER_Y, TILE_STEP, TileKind::Water);
    tiles.extend(tile_row(SHALLOW_WATER_Y, TILE_STEP, TileKind::ShallowWater));
    tiles
}

/// The single cactus, starting at the right-edge spawn point.
pub fn obstacle() -> ScrollEntity {
    ScrollEntity::tile(RESPAWN_X, OBSTACLE_Y, TileKind::Cactus)
}

/// Random on-screen cluster origin: x in `[0, width]`, y in `[0, height / 2]`.
fn initial_cloud_position<R: Rng>(rng: &mut R) -> (f64, f64) {
    let x = rng.gen_range(0..=VIEWPORT_WIDTH_PX) as f64;
    let y = rng.gen_range(0..=VIEWPORT_HEIGHT_PX) as f64 / 2.0;
    (x, y)
}

/// Three small, two medium and two long clouds with sequential ids.
pub fn cloud_clusters<R: Rng>(rng: &mut R) -> Vec<CloudCluster> {
    let mut clusters = Vec::new();
    let mut next_id = 0u32;
    for (size, count) in CLOUD_COUNTS {
        for _ in 0..count {
            let (x, y) = initial_cloud_position(rng);
            clusters.push(CloudCluster::new(ClusterId(next_id), size, x, y, TILE_STEP));
            next_id += 1;
        }
    }
    clusters
}

/// Build every scrolling pool for a fresh scene.
pub fn build_scroll_field<R: Rng>(rng: &mut R) -> ScrollField {
    ScrollField {
        ground: ground_tiles(),
        river: river_tiles(),
        obstacle: obstacle(),
        clouds: cloud_clusters(rng),
        respawn_cache: RespawnCache::new(),
        tile_speed: TILE_SPEED,
        cloud_speed: CLOUD_SPEED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_tile_row_covers_viewport_plus_overhang() {
        let row = tile_row(100.0, 18.0, TileKind::Ground);
        // 0, 18, ..., 450
        assert_eq!(row.len(), 26);
        assert!((row[0].x - 0.0).abs() < f64::EPSILON);
        assert!((row.last().unwrap().x - 450.0).abs() < f64::EPSILON);
        assert!(row.iter().all(|t| (t.y - 100.0).abs() < f64::EPSILON));

        let wide = tile_row(100.0, 24.0, TileKind::Ground);
        // 0, 24, ..., 456
        assert_eq!(wide.len(), 20);
    }

    #[test]
    fn test_ground_rows() {
        let tiles = ground_tiles();
        assert_eq!(tiles.len(), 26 * 4);

        let grass: Vec<_> = tiles.iter().filter(|t| t.kind == TileKind::Grass).collect();
        assert_eq!(grass.len(), 26);
        assert!(grass.iter().all(|t| (t.y - 218.0).abs() < f64::EPSILON));

        let rows: HashSet<i64> = tiles
            .iter()
            .filter(|t| t.kind == TileKind::Ground)
            .map(|t| t.y as i64)
            .collect();
        assert_eq!(rows, HashSet::from([272, 254, 236]));
    }

    #[test]
    fn test_river_rows() {
        let tiles = river_tiles();
        assert_eq!(tiles.len(), 52);
        assert!(tiles
            .iter()
            .filter(|t| t.kind == TileKind::Water)
            .all(|t| (t.y - 281.0).abs() < f64::EPSILON));
        assert!(tiles
            .iter()
            .filter(|t| t.kind == TileKind::ShallowWater)
            .all(|t| (t.y - 272.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_obstacle_starts_at_respawn_point() {
        let cactus = obstacle();
        assert!((cactus.x - 440.0).abs() < f64::EPSILON);
        assert!((cactus.y - 191.0).abs() < f64::EPSILON);
        assert_eq!(cactus.kind, TileKind::Cactus);
    }

    #[test]
    fn test_cloud_clusters() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let clusters = cloud_clusters(&mut rng);

        assert_eq!(clusters.len(), 7);
        let sizes: Vec<usize> = clusters.iter().map(|c| c.members.len()).collect();
        assert_eq!(sizes, vec![3, 3, 3, 4, 4, 5, 5]);

        let ids: HashSet<ClusterId> = clusters.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 7);

        for cluster in &clusters {
            let anchor = cluster.anchor();
            assert!((0.0..=VIEWPORT_WIDTH).contains(&anchor.x));
            assert!((0.0..=VIEWPORT_HEIGHT / 2.0).contains(&anchor.y));
        }
    }

    #[test]
    fn test_build_scroll_field() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let field = build_scroll_field(&mut rng);

        assert!(field.respawn_cache.is_empty());
        assert!((field.tile_speed - TILE_SPEED).abs() < f64::EPSILON);
        assert!((field.cloud_speed - CLOUD_SPEED).abs() < f64::EPSILON);
        assert_eq!(field.entity_count(), 104 + 52 + 1 + 27);
    }
}
