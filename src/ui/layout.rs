//! Screen layout per device
//!
//! The face was drawn for a 144x168 rectangular screen. Round screens and
//! the large rectangular model shift the elements by a fixed set of offsets.

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayShape {
    Rectangular,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceModel {
    Standard,
    /// High resolution rectangular model (200x228 and up)
    LargeRect,
}

/// Known devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Platform {
    Aplite,
    Basalt,
    Chalk,
    Diorite,
    Emery,
    PineTime,
}

impl Platform {
    pub const fn shape(self) -> DisplayShape {
        match self {
            Self::Chalk => DisplayShape::Round,
            _ => DisplayShape::Rectangular,
        }
    }

    pub const fn model(self) -> DeviceModel {
        match self {
            Self::Emery | Self::PineTime => DeviceModel::LargeRect,
            _ => DeviceModel::Standard,
        }
    }

    pub const fn screen_size(self) -> Size {
        match self {
            Self::Aplite | Self::Basalt | Self::Diorite => Size::new(144, 168),
            Self::Chalk => Size::new(180, 180),
            Self::Emery => Size::new(200, 228),
            Self::PineTime => Size::new(240, 240),
        }
    }

    pub const fn is_color(self) -> bool {
        !matches!(self, Self::Aplite | Self::Diorite)
    }

    pub const fn profile(self) -> DisplayProfile {
        DisplayProfile::resolve(self.shape(), self.model())
    }
}

// Text offsets only depend on the shape
const RECT_OFFSET_TIME_Y: i32 = 0;
const RECT_OFFSET_DATE_Y: i32 = 44;
const ROUND_OFFSET_TIME_Y: i32 = 30;
const ROUND_OFFSET_DATE_Y: i32 = 68;

const RECT_OFFSET_SPRITE: Point = Point::new(0, 0);
const RECT_OFFSET_BAR: Point = Point::new(0, 0);
const RECT_OFFSET_BT: Point = RECT_OFFSET_BAR;

const ROUND_OFFSET_SPRITE: Point = Point::new(44, 4);
const ROUND_OFFSET_BAR: Point = Point::new(-18, -104);
const ROUND_OFFSET_BT: Point = Point::new(36, -14);

const LARGE_RECT_OFFSET_SPRITE: Point = Point::new(12, 0);
const LARGE_RECT_OFFSET_BAR: Point = Point::new(28, -26);
const LARGE_RECT_OFFSET_BT: Point = LARGE_RECT_OFFSET_BAR;

// Base positions on the 144x168 design
const TIME_FRAME_X: i32 = 2;
const TIME_FRAME_HEIGHT: u32 = 48;
const DATE_FRAME_X: i32 = 3;
const DATE_FRAME_HEIGHT: u32 = 28;
const SPRITE_Y: i32 = 104;
const SPRITE_FRAME_HEIGHT: u32 = 64;
const BT_ICON_X: i32 = 90;
const BT_ICON_SIZE: u32 = 30;
const BAR_X: i32 = 75;
/// Vertical positions as thousandths of the screen height
const BT_ICON_Y_PERMILLE: i32 = 725;
const BAR_Y_PERMILLE: i32 = 675;

/// Pixel offsets of every element, fixed for the life of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayProfile {
    pub time_offset_y: i32,
    pub date_offset_y: i32,
    pub sprite_offset: Point,
    pub bar_offset: Point,
    pub bt_offset: Point,
}

impl DisplayProfile {
    pub const RECT: Self = Self {
        time_offset_y: RECT_OFFSET_TIME_Y,
        date_offset_y: RECT_OFFSET_DATE_Y,
        sprite_offset: RECT_OFFSET_SPRITE,
        bar_offset: RECT_OFFSET_BAR,
        bt_offset: RECT_OFFSET_BT,
    };

    pub const ROUND: Self = Self {
        time_offset_y: ROUND_OFFSET_TIME_Y,
        date_offset_y: ROUND_OFFSET_DATE_Y,
        sprite_offset: ROUND_OFFSET_SPRITE,
        bar_offset: ROUND_OFFSET_BAR,
        bt_offset: ROUND_OFFSET_BT,
    };

    pub const LARGE_RECT: Self = Self {
        time_offset_y: RECT_OFFSET_TIME_Y,
        date_offset_y: RECT_OFFSET_DATE_Y,
        sprite_offset: LARGE_RECT_OFFSET_SPRITE,
        bar_offset: LARGE_RECT_OFFSET_BAR,
        bt_offset: LARGE_RECT_OFFSET_BT,
    };

    /// Pick the offsets for a device.
    ///
    /// The large model takes precedence for sprite, bar and icon; the text
    /// offsets follow the shape alone.
    pub const fn resolve(shape: DisplayShape, model: DeviceModel) -> Self {
        let base = match shape {
            DisplayShape::Rectangular => Self::RECT,
            DisplayShape::Round => Self::ROUND,
        };
        match model {
            DeviceModel::LargeRect => Self {
                time_offset_y: base.time_offset_y,
                date_offset_y: base.date_offset_y,
                ..Self::LARGE_RECT
            },
            DeviceModel::Standard => base,
        }
    }

    pub fn time_frame(&self, bounds: Rectangle) -> Rectangle {
        Rectangle::new(
            Point::new(TIME_FRAME_X, self.time_offset_y),
            Size::new(bounds.size.width, TIME_FRAME_HEIGHT),
        )
    }

    pub fn date_frame(&self, bounds: Rectangle) -> Rectangle {
        Rectangle::new(
            Point::new(DATE_FRAME_X, self.date_offset_y),
            Size::new(bounds.size.width, DATE_FRAME_HEIGHT),
        )
    }

    pub fn sprite_frame(&self, bounds: Rectangle) -> Rectangle {
        Rectangle::new(
            Point::new(self.sprite_offset.x, SPRITE_Y + self.sprite_offset.y),
            Size::new(bounds.size.width / 2, SPRITE_FRAME_HEIGHT),
        )
    }

    /// Icon frame in window coordinates; only the unobstructed height moves it
    pub fn bt_icon_frame(&self, unobstructed: Rectangle) -> Rectangle {
        Rectangle::new(
            Point::new(
                BT_ICON_X + self.bt_offset.x,
                permille(unobstructed.size.height, BT_ICON_Y_PERMILLE) + self.bt_offset.y,
            ),
            Size::new(BT_ICON_SIZE, BT_ICON_SIZE),
        )
    }

    /// Top left corner of the battery bar fill, relative to the window.
    ///
    /// The bar is laid out inside the unobstructed area, so it follows that
    /// area's origin.
    pub fn battery_anchor(&self, unobstructed: Rectangle) -> Point {
        unobstructed.top_left
            + Point::new(
                BAR_X + self.bar_offset.x,
                permille(unobstructed.size.height, BAR_Y_PERMILLE) + self.bar_offset.y,
            )
    }
}

fn permille(length: u32, permille: i32) -> i32 {
    length as i32 * permille / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(width: u32, height: u32) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(width, height))
    }

    #[test]
    fn profile_selection_is_exclusive() {
        let rect = DisplayProfile::resolve(DisplayShape::Rectangular, DeviceModel::Standard);
        let round = DisplayProfile::resolve(DisplayShape::Round, DeviceModel::Standard);
        let large = DisplayProfile::resolve(DisplayShape::Rectangular, DeviceModel::LargeRect);

        assert_eq!(rect, DisplayProfile::RECT);
        assert_eq!(round, DisplayProfile::ROUND);
        assert_eq!(large, DisplayProfile::LARGE_RECT);
        assert_ne!(rect, round);
        assert_ne!(rect, large);
        assert_ne!(round, large);
    }

    #[test]
    fn round_constants() {
        let round = Platform::Chalk.profile();
        assert_eq!(round.time_offset_y, 30);
        assert_eq!(round.date_offset_y, 68);
        assert_eq!(round.sprite_offset, Point::new(44, 4));
        assert_eq!(round.bar_offset, Point::new(-18, -104));
        assert_eq!(round.bt_offset, Point::new(36, -14));
    }

    #[test]
    fn large_model_keeps_rectangular_text_offsets() {
        let large = Platform::Emery.profile();
        assert_eq!((large.time_offset_y, large.date_offset_y), (0, 44));
        assert_eq!(large.sprite_offset, Point::new(12, 0));
        assert_eq!(large.bar_offset, Point::new(28, -26));
        assert_eq!(large.bt_offset, large.bar_offset);
    }

    #[test]
    fn platforms_map_to_profiles() {
        assert_eq!(Platform::Basalt.profile(), DisplayProfile::RECT);
        assert_eq!(Platform::Aplite.profile(), DisplayProfile::RECT);
        assert_eq!(Platform::Chalk.profile(), DisplayProfile::ROUND);
        assert_eq!(Platform::PineTime.profile(), DisplayProfile::LARGE_RECT);
        assert!(!Platform::Diorite.is_color());
        assert!(Platform::Basalt.is_color());
    }

    #[test]
    fn element_frames_on_standard_screen() {
        let profile = DisplayProfile::RECT;
        let bounds = screen(144, 168);

        assert_eq!(profile.time_frame(bounds), Rectangle::new(Point::new(2, 0), Size::new(144, 48)));
        assert_eq!(profile.date_frame(bounds), Rectangle::new(Point::new(3, 44), Size::new(144, 28)));
        assert_eq!(profile.sprite_frame(bounds), Rectangle::new(Point::new(0, 104), Size::new(72, 64)));
        // 168 * 0.725 = 121.8
        assert_eq!(profile.bt_icon_frame(bounds), Rectangle::new(Point::new(90, 121), Size::new(30, 30)));
        // 168 * 0.675 = 113.4
        assert_eq!(profile.battery_anchor(bounds), Point::new(75, 113));
    }

    #[test]
    fn element_frames_on_round_screen() {
        let profile = DisplayProfile::ROUND;
        let bounds = screen(180, 180);

        // 180 * 0.675 = 121.5
        assert_eq!(profile.battery_anchor(bounds), Point::new(57, 17));
        // 180 * 0.725 = 130.5
        assert_eq!(profile.bt_icon_frame(bounds).top_left, Point::new(126, 116));
        assert_eq!(profile.sprite_frame(bounds).top_left, Point::new(44, 108));
    }

    #[test]
    fn obstructed_screen_shifts_only_the_bar() {
        let profile = DisplayProfile::RECT;
        // Top 20 rows covered by a system overlay
        let unobstructed = Rectangle::new(Point::new(0, 20), Size::new(144, 148));

        // 148 * 0.675 = 99.9
        assert_eq!(profile.battery_anchor(unobstructed), Point::new(75, 119));
        // 148 * 0.725 = 107.3
        assert_eq!(profile.bt_icon_frame(unobstructed).top_left, Point::new(90, 107));
    }
}
