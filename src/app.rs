//! The whole celebration: owns every layer and runs one tick at a time.

use std::sync::Arc;

use image::RgbaImage;

use crate::assets::Assets;
use crate::audio::Music;
use crate::canvas::Canvas;
use crate::constants::{CAKE_POSITIONS, CAKE_SCALE, POPUP_EVERY};
use crate::fireworks::FireworkField;
use crate::input::InputEvent;
use crate::random::RandomSource;
use crate::scene::Layer;
use crate::scene::banner::Banner;
use crate::scene::cake::BirthdayCake;
use crate::scene::popup::ImagePopup;
use crate::scene::sky::NightSky;

pub struct BirthdayApp {
    running: bool,
    field: FireworkField,
    sky: NightSky,
    cakes: Vec<BirthdayCake>,
    banner: Banner,
    popup: Option<ImagePopup>,
    special_image: Option<Arc<RgbaImage>>,
    music: Music,
    rng: RandomSource,
}

impl BirthdayApp {
    pub fn new(assets: Assets, mut rng: RandomSource) -> Self {
        let field = FireworkField::new(RandomSource::with_seed(rng.next_u32().into()));
        let sky = NightSky::new(&mut rng);
        let cakes = CAKE_POSITIONS
            .iter()
            .map(|&(x, y)| {
                let cake_rng = RandomSource::with_seed(rng.next_u32().into());
                BirthdayCake::new(x, y, CAKE_SCALE, cake_rng)
            })
            .collect();

        Self {
            running: true,
            field,
            sky,
            cakes,
            banner: Banner::new(),
            popup: None,
            special_image: assets.image,
            music: Music::open(assets.music.as_deref()),
            rng,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub const fn field(&self) -> &FireworkField {
        &self.field
    }

    #[cfg(test)]
    pub const fn popup(&self) -> Option<&ImagePopup> {
        self.popup.as_ref()
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            InputEvent::KeyPressed(' ') => self.field.launch_random(),
            InputEvent::KeyPressed('m') => self.music.toggle(),
            InputEvent::KeyPressed(_) => {}
            InputEvent::PointerClicked { x, y } => {
                tracing::debug!("Click at ({x:.0}, {y:.0})");
                let bottom = self.field.bottom();
                self.field.launch_at(x, bottom);
            }
        }
    }

    /// One simulation step. Nothing is drawn here.
    pub fn update(&mut self) {
        if self.field.tick() && self.field.spawn_count() % POPUP_EVERY == 0 {
            self.show_popup();
        }
        self.field.advance_all();

        for cake in &mut self.cakes {
            cake.update();
        }
        self.sky.update();

        if let Some(popup) = self.popup.as_mut() {
            popup.update();
            if !popup.is_alive() {
                self.popup = None;
            }
        }
    }

    fn show_popup(&mut self) {
        let Some(image) = self.special_image.clone() else {
            return;
        };
        tracing::info!(
            "Showing the special image after {} launches",
            self.field.spawn_count()
        );
        self.popup = Some(ImagePopup::new(image, &mut self.rng));
    }

    /// Back to front: sky, fireworks, cakes, text, then the popup on top.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.sky.draw(canvas);
        self.field.draw(canvas);
        for cake in &self.cakes {
            cake.draw(canvas);
        }
        self.banner.draw(canvas);
        if let Some(popup) = &self.popup {
            popup.draw(canvas);
        }
    }
}
