mod main_loop;

use std::{error::Error, sync::Arc};

use image::{DynamicImage, Rgba as ImageRgba, RgbaImage};
use sdl2::event::{Event, WindowEvent};
use vek::{Quaternion, Rect, Transform, Vec3};

use scene_renderer::{
    asset_container::Assets,
    config::RendererConfig,
    geometry::create_cuboid,
    lighting::DirectionalLight,
    mesh_component::MeshComponent,
    prelude::{arc_rw_lock_new, ArcRwLock},
    renderer::{SceneRenderer, PHONG_SHADER_NAME, SPRITE_SHADER_NAME},
    sprite_component::SpriteComponent,
    texture::Texture,
};
use sdl2_opengl_scene_renderer::{
    gl_device::GLDevice, gl_geometry_buffer::GLGeometryBuffer,
    gl_shader_program::GLShaderProgram, gl_texture::GLTexture,
    opengl_utils::texture_2d::GLTextureSamplingMode,
};

use crate::main_loop::MainLoop;

const SHADER_DIRECTORY: &str = "assets/shaders";
const DESIRED_FPS: f32 = 60.0;
const SHEET_FRAME_SIZE: u32 = 32;
const SHEET_FRAME_COUNT: u32 = 4;

fn checkerboard(size: u32, cell_size: u32, a: [u8; 4], b: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell_size + y / cell_size) % 2 == 0 {
            ImageRgba(a)
        } else {
            ImageRgba(b)
        }
    }))
}

/// Horizontal strip of frames, each a filled disc of a different color.
fn sprite_sheet() -> DynamicImage {
    let colors = [
        [255, 80, 80, 255],
        [255, 200, 80, 255],
        [80, 255, 120, 255],
        [80, 160, 255, 255],
    ];
    let radius = SHEET_FRAME_SIZE as f32 / 2.0;

    DynamicImage::ImageRgba8(RgbaImage::from_fn(
        SHEET_FRAME_SIZE * SHEET_FRAME_COUNT,
        SHEET_FRAME_SIZE,
        |x, y| {
            let frame = (x / SHEET_FRAME_SIZE) as usize;
            let dx = (x % SHEET_FRAME_SIZE) as f32 + 0.5 - radius;
            let dy = y as f32 + 0.5 - radius;

            if dx * dx + dy * dy <= radius * radius {
                ImageRgba(colors[frame % colors.len()])
            } else {
                ImageRgba([0, 0, 0, 0])
            }
        },
    ))
}

fn sheet_frame(index: u32) -> Rect<f32, f32> {
    Rect::new(
        ((index % SHEET_FRAME_COUNT) * SHEET_FRAME_SIZE) as f32,
        0.0,
        SHEET_FRAME_SIZE as f32,
        SHEET_FRAME_SIZE as f32,
    )
}

fn load_shaders(assets: &Assets) -> Result<(), Box<dyn Error>> {
    for name in [PHONG_SHADER_NAME, SPRITE_SHADER_NAME] {
        let shader = GLShaderProgram::load(format!("{SHADER_DIRECTORY}/{name}"))?;
        assets.insert_shader(name, Arc::new(shader));
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = RendererConfig::default();

    let sdl_context = sdl2::init()?;
    let sdl_video = sdl_context.video()?;
    let mut event_pump = sdl_context.event_pump()?;

    let device = GLDevice::new(
        sdl_video,
        "scene_demo",
        config.window_width,
        config.window_height,
    );

    let assets = Arc::new(Assets::new());
    let mut renderer = SceneRenderer::initialize(Box::new(device), assets.clone(), config)?;

    load_shaders(&assets)?;

    renderer.set_ambient_light(Vec3::broadcast(0.2));
    renderer.set_directional_light(DirectionalLight {
        direction: Vec3::new(0.0, -0.707, -0.707),
        diffuse_color: Vec3::new(0.78, 0.88, 1.0),
        spec_color: Vec3::new(0.8, 0.8, 0.8),
    });

    // the default camera sits at the origin looking down +x with +z up
    let cube_owner: ArcRwLock<Transform<f32, f32, f32>> = arc_rw_lock_new(Transform {
        position: Vec3::new(400.0, 0.0, 0.0),
        ..Default::default()
    });
    let cube_texture = Arc::new(GLTexture::new(&checkerboard(
        128,
        16,
        [230, 230, 230, 255],
        [90, 90, 110, 255],
    )));
    let cube_data = create_cuboid(100.0, 100.0, 100.0);
    let cube = MeshComponent::new(
        cube_owner.clone(),
        Arc::new(GLGeometryBuffer::new(&cube_data.vertices, &cube_data.indices)),
    )
    .with_texture(cube_texture);
    renderer.add_mesh(arc_rw_lock_new(cube));

    let tile_texture = Arc::new(GLTexture::new(&checkerboard(
        64,
        8,
        [255, 255, 255, 200],
        [40, 40, 40, 200],
    )));
    tile_texture.set_sampling_mode(GLTextureSamplingMode::Nearest);
    for (index, draw_order) in [(0, 20), (1, 10)] {
        let owner = arc_rw_lock_new(Transform {
            position: Vec3::new(80.0 + index as f32 * 32.0, 80.0 + index as f32 * 32.0, 0.0),
            ..Default::default()
        });
        renderer.add_sprite(arc_rw_lock_new(SpriteComponent::new(
            owner,
            tile_texture.clone(),
            draw_order,
        )));
    }

    let sheet_texture = Arc::new(GLTexture::new(&sprite_sheet()));
    let sheet_owner = arc_rw_lock_new(Transform {
        position: Vec3::new(200.0, 200.0, 0.0),
        // the quad is sized to the whole sheet, shrink it to one frame
        scale: Vec3::new(1.0 / SHEET_FRAME_COUNT as f32, 1.0, 1.0),
        ..Default::default()
    });
    log::debug!(
        "Sprite sheet created, width = {}, height = {}",
        sheet_texture.width(),
        sheet_texture.height()
    );
    let animated_sprite = arc_rw_lock_new(
        SpriteComponent::new(sheet_owner, sheet_texture, 30).with_source_rect(sheet_frame(0)),
    );
    renderer.add_sprite(animated_sprite.clone());

    let mut elapsed_in_secs = 0.0;

    let main_loop = MainLoop::new(DESIRED_FPS);
    'running: for delta_time_in_secs in main_loop.iter() {
        for event in event_pump.poll_iter() {
            match event {
                Event::Window {
                    win_event: WindowEvent::SizeChanged(width, height),
                    ..
                } => {
                    renderer.set_window_dimensions(width.max(1) as u32, height.max(1) as u32);
                }
                Event::Quit { .. } => break 'running,
                _ => {}
            }
        }

        elapsed_in_secs += delta_time_in_secs;

        cube_owner.write().orientation =
            Quaternion::rotation_z(elapsed_in_secs) * Quaternion::rotation_y(elapsed_in_secs * 0.5);
        animated_sprite
            .write()
            .set_source_rect(Some(sheet_frame((elapsed_in_secs * 6.0) as u32)));

        renderer.begin_frame();
        if let Err(e) = renderer.draw() {
            log::error!("Drawing frame, msg = {e}");
            break;
        }
        renderer.end_frame();
    }

    // textures and shaders hold GPU objects, so they go before the context
    drop(animated_sprite);
    drop(tile_texture);
    assets.clear();
    renderer.close();

    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        log::error!("scene_demo failed, msg = {e}");
        std::process::exit(1);
    }
}
