use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 그리기 대상. 실제 픽셀 출력은 바깥 렌더러가 담당한다.
pub trait Canvas {
    fn clear(&mut self, color: u8);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u8);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: u8);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        color: u8,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: u8,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: u8,
    },
}

/// 그리기 명령을 그대로 쌓아 두는 캔버스
#[derive(Debug, Default)]
pub struct CommandCanvas {
    pub commands: Vec<DrawCommand>,
}

impl CommandCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Canvas for CommandCanvas {
    fn clear(&mut self, color: u8) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u8) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: u8) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}
