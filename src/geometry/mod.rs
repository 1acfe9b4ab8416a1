//! 겹침 판정용 순수 함수들
//!
//! 상태도 부작용도 없다. 폭이나 반지름이 0 이하이면 면적이 0인 영역으로 보고
//! 아무것도 잡지 않는다.

use glam::Vec2;

use crate::enums::Direction;

/// 빔 한 번의 판정 영역
///
/// 빔은 원점에서 진행 방향으로 끝까지 열려 있다. 진행 방향 쪽 경계(`left`,
/// `right`, `top`, `bottom` 중 하나)는 그리기용일 뿐 판정에는 쓰이지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamRegion {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub direction: Direction,
}

impl BeamRegion {
    /// `origin` 에 고정된 영역 계산. `bounds` 는 아레나의 (width, height).
    pub fn anchored(origin: Vec2, half_width: f32, direction: Direction, bounds: Vec2) -> Self {
        let half_width = clamp_extent(half_width);
        match direction {
            Direction::Right => Self {
                left: origin.x,
                right: bounds.x,
                top: origin.y - half_width,
                bottom: origin.y + half_width,
                direction,
            },
            Direction::Left => Self {
                left: 0.0,
                right: origin.x,
                top: origin.y - half_width,
                bottom: origin.y + half_width,
                direction,
            },
            Direction::Up => Self {
                left: origin.x - half_width,
                right: origin.x + half_width,
                top: 0.0,
                bottom: origin.y,
                direction,
            },
            Direction::Down => Self {
                left: origin.x - half_width,
                right: origin.x + half_width,
                top: origin.y,
                bottom: bounds.y,
                direction,
            },
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        match self.direction {
            Direction::Right => point.x >= self.left && self.top < point.y && point.y < self.bottom,
            Direction::Left => point.x <= self.right && self.top < point.y && point.y < self.bottom,
            Direction::Up => point.y <= self.bottom && self.left < point.x && point.x < self.right,
            Direction::Down => point.y >= self.top && self.left < point.x && point.x < self.right,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(
            (self.right - self.left).max(0.0),
            (self.bottom - self.top).max(0.0),
        )
    }
}

/// 점이 방향성 직사각형 영역 안에 있는지 검사한다.
///
/// RIGHT 는 `point.x >= origin.x` 이고 y 가 `origin.y ± half_width` 사이(경계 제외),
/// LEFT 는 영역의 오른쪽 경계(= `origin.x`)를 기준으로 좌우 반전이다. UP/DOWN 은 같은
/// 규칙을 세로축으로 옮긴 것이다.
pub fn in_directional_region(
    point: Vec2,
    origin: Vec2,
    half_width: f32,
    boundary: Vec2,
    direction: Direction,
) -> bool {
    BeamRegion::anchored(origin, half_width, direction, boundary).contains(point)
}

/// 원 안(경계 포함)에 있는지 검사. 반지름이 0 이하이면 항상 false.
pub fn in_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    if !(radius > 0.0) {
        return false;
    }
    point.distance_squared(center) <= radius * radius
}

fn clamp_extent(value: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(160.0, 120.0);

    #[test]
    fn test_right_region() {
        let origin = Vec2::new(50.0, 50.0);
        assert!(in_directional_region(Vec2::new(80.0, 55.0), origin, 10.0, BOUNDS, Direction::Right));
        assert!(in_directional_region(Vec2::new(50.0, 50.0), origin, 10.0, BOUNDS, Direction::Right));
        assert!(!in_directional_region(Vec2::new(49.0, 50.0), origin, 10.0, BOUNDS, Direction::Right));
        assert!(!in_directional_region(Vec2::new(80.0, 65.0), origin, 10.0, BOUNDS, Direction::Right));
        // y 경계는 열린 구간
        assert!(!in_directional_region(Vec2::new(80.0, 60.0), origin, 10.0, BOUNDS, Direction::Right));
    }

    #[test]
    fn test_right_region_is_open_ended() {
        let origin = Vec2::new(50.0, 50.0);
        assert!(in_directional_region(Vec2::new(500.0, 50.0), origin, 10.0, BOUNDS, Direction::Right));
    }

    #[test]
    fn test_left_region_mirrors_right() {
        let origin = Vec2::new(100.0, 40.0);
        assert!(in_directional_region(Vec2::new(10.0, 45.0), origin, 10.0, BOUNDS, Direction::Left));
        assert!(in_directional_region(Vec2::new(100.0, 40.0), origin, 10.0, BOUNDS, Direction::Left));
        assert!(!in_directional_region(Vec2::new(101.0, 40.0), origin, 10.0, BOUNDS, Direction::Left));
        assert!(!in_directional_region(Vec2::new(10.0, 51.0), origin, 10.0, BOUNDS, Direction::Left));
    }

    #[test]
    fn test_vertical_regions() {
        let origin = Vec2::new(80.0, 60.0);
        // UP 은 화면 위쪽(y 감소)
        assert!(in_directional_region(Vec2::new(85.0, 10.0), origin, 10.0, BOUNDS, Direction::Up));
        assert!(!in_directional_region(Vec2::new(85.0, 70.0), origin, 10.0, BOUNDS, Direction::Up));
        assert!(!in_directional_region(Vec2::new(95.0, 10.0), origin, 10.0, BOUNDS, Direction::Up));

        assert!(in_directional_region(Vec2::new(75.0, 110.0), origin, 10.0, BOUNDS, Direction::Down));
        assert!(!in_directional_region(Vec2::new(75.0, 50.0), origin, 10.0, BOUNDS, Direction::Down));
        assert!(!in_directional_region(Vec2::new(70.0, 110.0), origin, 10.0, BOUNDS, Direction::Down));
    }

    #[test]
    fn test_zero_or_negative_width_detects_nothing() {
        let origin = Vec2::new(50.0, 50.0);
        for width in [0.0, -4.0, f32::NAN] {
            assert!(!in_directional_region(origin, origin, width, BOUNDS, Direction::Right));
            assert!(!in_directional_region(Vec2::new(60.0, 50.0), origin, width, BOUNDS, Direction::Right));
        }
    }

    #[test]
    fn test_radius_boundary_inclusive() {
        let center = Vec2::new(100.0, 100.0);
        assert!(in_radius(Vec2::new(124.0, 100.0), center, 24.0));
        assert!(in_radius(Vec2::new(118.0, 100.0), center, 24.0));
        assert!(!in_radius(Vec2::new(125.0, 100.0), center, 24.0));
    }

    #[test]
    fn test_radius_degenerate() {
        let center = Vec2::new(10.0, 10.0);
        assert!(!in_radius(center, center, 0.0));
        assert!(!in_radius(center, center, -3.0));
    }

    #[test]
    fn test_region_size() {
        let region = BeamRegion::anchored(Vec2::new(40.0, 60.0), 10.0, Direction::Right, BOUNDS);
        assert_eq!(region.size(), Vec2::new(120.0, 20.0));
    }
}
