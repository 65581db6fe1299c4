//! Shards of Grandeur watchface
//!
//! Layers from back to front: background canvas, character sprite, time,
//! date, Bluetooth icon and battery bar.

use embedded_graphics::{
    geometry::Point,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use super::{
    assets::{Bitmap, BitmapId, Font, FontId},
    battery_bar::BatteryBar,
    label::Label,
    layout::DisplayProfile,
    WatchColor, WatchFace, WatchFaceState,
};
use crate::system::host::AssetStore;

/// Rectangular region that is repainted as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    frame: Rectangle,
    hidden: bool,
    dirty: bool,
}

impl Layer {
    fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            hidden: false,
            dirty: true,
        }
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if self.hidden != hidden {
            self.hidden = hidden;
            self.dirty = true;
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[derive(Debug)]
struct TextLayer {
    layer: Layer,
    font: Font,
}

#[derive(Debug)]
struct BitmapLayer {
    layer: Layer,
    bitmap: Bitmap,
}

/// Loaded watchface layers and the assets they hold
#[derive(Debug)]
pub struct ShardsWatchface {
    canvas: Layer,
    sprite: BitmapLayer,
    time: TextLayer,
    date: TextLayer,
    bt_icon: BitmapLayer,
    battery: Layer,
    battery_anchor: Point,
}

impl ShardsWatchface {
    /// Load assets and lay out every element for the given screen
    pub fn load<A>(assets: &mut A, profile: &DisplayProfile, bounds: Rectangle, unobstructed: Rectangle) -> Self
    where
        A: AssetStore,
    {
        let time_font = assets.load_font(FontId::Time);
        let date_font = assets.load_font(FontId::Date);
        let sprite = assets.load_bitmap(BitmapId::Sprite);
        let bt_icon = assets.load_bitmap(BitmapId::BluetoothDisconnected);

        Self {
            canvas: Layer::new(unobstructed),
            sprite: BitmapLayer {
                layer: Layer::new(profile.sprite_frame(bounds)),
                bitmap: sprite,
            },
            time: TextLayer {
                layer: Layer::new(profile.time_frame(bounds)),
                font: time_font,
            },
            date: TextLayer {
                layer: Layer::new(profile.date_frame(bounds)),
                font: date_font,
            },
            bt_icon: BitmapLayer {
                layer: Layer::new(profile.bt_icon_frame(unobstructed)),
                bitmap: bt_icon,
            },
            battery: Layer::new(unobstructed),
            battery_anchor: profile.battery_anchor(unobstructed),
        }
    }

    /// Return every asset to the store, newest first
    pub fn unload<A>(self, assets: &mut A)
    where
        A: AssetStore,
    {
        assets.release_bitmap(self.bt_icon.bitmap);
        assets.release_bitmap(self.sprite.bitmap);
        assets.release_font(self.date.font);
        assets.release_font(self.time.font);
    }

    fn layers(&self) -> [&Layer; 6] {
        [
            &self.canvas,
            &self.sprite.layer,
            &self.time.layer,
            &self.date.layer,
            &self.bt_icon.layer,
            &self.battery,
        ]
    }

    /// Whether any layer changed since the last draw
    pub fn needs_redraw(&self) -> bool {
        self.layers().iter().any(|layer| layer.dirty)
    }

    /// Time and date text changed
    pub fn mark_clock_dirty(&mut self) {
        self.time.layer.mark_dirty();
        self.date.layer.mark_dirty();
    }

    pub fn mark_battery_dirty(&mut self) {
        self.battery.mark_dirty();
    }

    pub fn set_bt_icon_hidden(&mut self, hidden: bool) {
        self.bt_icon.layer.set_hidden(hidden);
    }

    pub fn bt_icon(&self) -> &Layer {
        &self.bt_icon.layer
    }

    pub fn time_layer(&self) -> &Layer {
        &self.time.layer
    }

    pub fn battery_anchor(&self) -> Point {
        self.battery_anchor
    }
}

impl<C: WatchColor> WatchFace<C> for ShardsWatchface {
    fn draw<D>(&mut self, target: &mut D, state: &WatchFaceState<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let palette = C::PALETTE;

        self.canvas
            .frame
            .into_styled(PrimitiveStyle::with_fill(palette.background))
            .draw(target)?;

        self.sprite
            .bitmap
            .draw_in(target, self.sprite.layer.frame, palette.text)?;

        for (text_layer, text) in [(&self.time, state.clock.time()), (&self.date, state.clock.date())] {
            Label::new(
                text_layer.layer.frame,
                text,
                text_layer.font.face(),
                palette.text,
                palette.background,
            )
            .draw(target)?;
        }

        if !self.bt_icon.layer.hidden {
            self.bt_icon
                .bitmap
                .draw_in(target, self.bt_icon.layer.frame, palette.text)?;
        }

        BatteryBar::new(self.battery_anchor, state.battery, &palette)
            .draw(&mut target.clipped(&self.battery.frame))?;

        for layer in [
            &mut self.canvas,
            &mut self.sprite.layer,
            &mut self.time.layer,
            &mut self.date.layer,
            &mut self.bt_icon.layer,
            &mut self.battery,
        ] {
            layer.dirty = false;
        }
        Ok(())
    }
}
