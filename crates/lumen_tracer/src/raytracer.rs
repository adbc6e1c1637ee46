//! Resumable, time-sliced tracing driver.
//!
//! A session starts with [`Raytracer::initialize`]. Each [`Raytracer::raytrace`]
//! call then renders whole rows, bottom to top, until the image is done or the
//! time budget runs out, and returns control to the caller's frame loop.

use std::time::{Duration, Instant};

use crate::camera::CameraRays;
use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::shading::trace_ray;
use lumen_core::{Color, Scene};
use lumen_math::{Camera, Interval};

/// Convert a color to 8-bit RGBA.
///
/// Channels are clamped to `[0, 1]` and truncated; alpha is always opaque.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// State of one `initialize` -> completion cycle.
struct Session<'a> {
    scene: &'a Scene,
    rays: CameraRays,
    current_row: u32,
    started: Instant,
}

/// Incremental Whitted ray tracer.
pub struct Raytracer<'a> {
    config: TraceConfig,
    session: Option<Session<'a>>,
}

impl Default for Raytracer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Raytracer<'a> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Start a new trace of `scene` at `width` x `height`.
    ///
    /// The scene must already have been through [`Scene::prepare`]; it is
    /// only read from here on. Any previous session is discarded, even if
    /// this call fails, so the same scene can be re-initialized to restart or
    /// resize the trace.
    pub fn initialize(&mut self, scene: &'a Scene, width: u32, height: u32, camera: &Camera) -> Result<(), TraceError> {
        self.session = None;

        let rays = CameraRays::new(camera, width, height)?;
        scene.check_prepared()?;

        log::info!(
            "Raytracing {}x{}: {} geometries ({} triangles), {} lights",
            width,
            height,
            scene.num_geometries(),
            scene.total_triangle_count(),
            scene.num_lights()
        );

        self.session = Some(Session {
            scene,
            rays,
            current_row: 0,
            started: Instant::now(),
        });
        Ok(())
    }

    /// Continue the trace, writing RGBA8 pixels into `buffer`.
    ///
    /// `buffer` must hold exactly `width * height * 4` bytes; row 0 is the
    /// bottom of the image. With `max_time`, returns once a row finishes past
    /// the budget (at least one row is always rendered). Without it, runs to
    /// completion.
    ///
    /// Returns `true` once the whole image is rendered.
    pub fn raytrace(&mut self, buffer: &mut [u8], max_time: Option<Duration>) -> Result<bool, TraceError> {
        let config = &self.config;
        let session = self.session.as_mut().ok_or(TraceError::NotInitialized)?;

        let width = session.rays.width();
        let height = session.rays.height();
        let expected = width as usize * height as usize * 4;
        if buffer.len() != expected {
            return Err(TraceError::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        if session.current_row >= height {
            return Ok(true);
        }

        let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(buffer);
        let deadline = max_time.and_then(|budget| Instant::now().checked_add(budget));
        let progress_interval = config.progress_interval.max(1);

        while session.current_row < height {
            let row = session.current_row;
            if row % progress_interval == 0 {
                log::debug!("Raytracing (row {})...", row);
            }

            let row_start = row as usize * width as usize;
            for (x, pixel) in pixels[row_start..row_start + width as usize].iter_mut().enumerate() {
                let ray = session.rays.ray(x as u32, row);
                let color = trace_ray(session.scene, &ray, session.rays.range(), config.max_depth, config);
                *pixel = color_to_rgba(color);
            }
            session.current_row += 1;

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
        }

        let complete = session.current_row >= height;
        if complete {
            log::info!(
                "Raytracing complete in {} ms",
                session.started.elapsed().as_millis()
            );
        }
        Ok(complete)
    }

    /// True once the current session has rendered every row.
    pub fn is_complete(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.current_row >= s.rays.height())
    }

    /// Next row to render, or `None` before `initialize`.
    pub fn current_row(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.current_row)
    }

    /// Image size of the current session.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.session
            .as_ref()
            .map(|s| (s.rays.width(), s.rays.height()))
    }
}
