use glium::glutin::dpi::PhysicalSize;
use glium::glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glium::glutin::event_loop::{ControlFlow, EventLoop};
use glium::glutin::window::WindowBuilder;
use glium::glutin::ContextBuilder;
use glium::texture::RawImage2d;
use glium::uniforms::MagnifySamplerFilter;
use glium::{Display, Surface, Texture2d};

use crate::error::RenderError;

/// Whatever a finished frame is shown on.
pub trait DisplaySurface {
    /// Size in pixels a presented buffer has to match.
    fn dimensions(&self) -> (u32, u32);

    /// Shows a `width * height` row-major RGBA8 buffer.
    fn present(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<(), RenderError>;
}

/// Keeps the last presented frame in memory.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    frame: Option<Vec<u8>>,
    presents: usize,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> HeadlessSurface {
        HeadlessSurface {
            width,
            height,
            frame: None,
            presents: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&[u8]> {
        self.frame.as_deref()
    }

    pub fn present_count(&self) -> usize {
        self.presents
    }
}

impl DisplaySurface for HeadlessSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<(), RenderError> {
        debug_assert_eq!(rgba.len(), width as usize * height as usize * 4);

        self.frame = Some(rgba.to_vec());
        self.presents += 1;

        Ok(())
    }
}

/// A fixed-size window; presented frames are uploaded as a texture and
/// blitted onto the default framebuffer.
pub struct WindowSurface {
    display: Display,
    width: u32,
    height: u32,
    texture: Option<Texture2d>,
}

impl WindowSurface {
    pub fn new(
        event_loop: &EventLoop<()>,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<WindowSurface, RenderError> {
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false);
        let context = ContextBuilder::new().with_vsync(true);

        let display = Display::new(window, context, event_loop)
            .map_err(|why| RenderError::Surface(why.to_string()))?;

        Ok(WindowSurface {
            display,
            width,
            height,
            texture: None,
        })
    }

    fn redraw(&self) -> Result<(), RenderError> {
        let texture = match &self.texture {
            Some(texture) => texture,
            None => return Ok(()),
        };

        let target = self.display.draw();
        texture
            .as_surface()
            .fill(&target, MagnifySamplerFilter::Nearest);

        target
            .finish()
            .map_err(|why| RenderError::Surface(why.to_string()))
    }

    /// Keeps the window open, redrawing the presented frame until it is closed.
    pub fn run(self, event_loop: EventLoop<()>) -> ! {
        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                        ..
                    } => *control_flow = ControlFlow::Exit,
                    _ => {}
                },

                Event::RedrawRequested(_) => {
                    if let Err(why) = self.redraw() {
                        log::error!("{why}");
                        *control_flow = ControlFlow::Exit;
                    }
                }

                _ => {}
            }
        })
    }
}

impl DisplaySurface for WindowSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<(), RenderError> {
        // GL textures start at the bottom row
        let image = RawImage2d::from_raw_rgba_reversed(rgba, (width, height));
        let texture = Texture2d::new(&self.display, image)
            .map_err(|why| RenderError::Surface(why.to_string()))?;

        self.texture = Some(texture);
        self.redraw()
    }
}
