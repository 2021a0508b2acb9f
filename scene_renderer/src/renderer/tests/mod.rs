
use std::sync::{atomic::Ordering, Arc};

use approx::assert_relative_eq;
use vek::{Mat4, Rgba, Vec2, Vec3, Vec4};

use crate::{
    asset_container::{AssetRegistry, Assets},
    config::RendererConfig,
    drawable::Flip,
    error::{ContextInitError, RendererError, ResourceKind},
    graphics_device::{BlendState, DeviceError, GeometryBuffer, GraphicsDevice},
    lighting::DirectionalLight,
    mesh_component::MeshComponent,
    prelude::arc_rw_lock_new,
    renderer::{FramePhase, SceneRenderer, PHONG_SHADER_NAME, SPRITE_SHADER_NAME},
    sprite_component::SpriteComponent,
};

use test_device::{
    new_call_log, Call, CallLog, InitFailure, TestDevice, TestMesh, TestShader, TestTexture,
};

struct TestContext {
    calls: CallLog,
    assets: Arc<Assets>,
    renderer: SceneRenderer,
    released_geometries: Arc<std::sync::atomic::AtomicUsize>,
}

fn test_config() -> RendererConfig {
    RendererConfig {
        window_width: 1024,
        window_height: 768,
        validate_gpu_calls: true,
        ..RendererConfig::default()
    }
}

fn init_test() -> TestContext {
    let _ = env_logger::builder().is_test(true).try_init();

    let calls = new_call_log();

    let assets = Arc::new(Assets::new());
    assets.insert_shader(
        PHONG_SHADER_NAME,
        Arc::new(TestShader::new(PHONG_SHADER_NAME, calls.clone())),
    );
    assets.insert_shader(
        SPRITE_SHADER_NAME,
        Arc::new(TestShader::new(SPRITE_SHADER_NAME, calls.clone())),
    );

    let device = TestDevice::new(calls.clone());
    let released_geometries = device.released_geometries();

    let renderer = match SceneRenderer::initialize(Box::new(device), assets.clone(), test_config())
    {
        Ok(renderer) => renderer,
        Err(e) => panic!("renderer initialization failed, msg = {e}"),
    };

    calls.write().clear();

    TestContext {
        calls,
        assets,
        renderer,
        released_geometries,
    }
}

fn add_sprite(context: &mut TestContext, texture_name: &str, draw_order: i32) {
    let owner = arc_rw_lock_new(Mat4::<f32>::identity());
    let texture = Arc::new(TestTexture::new(
        texture_name,
        64,
        32,
        context.calls.clone(),
    ));

    context
        .renderer
        .add_sprite(arc_rw_lock_new(SpriteComponent::new(
            owner, texture, draw_order,
        )));
}

fn calls_matching(calls: &CallLog, predicate: impl Fn(&Call) -> bool) -> Vec<Call> {
    calls
        .read()
        .iter()
        .filter(|call| predicate(call))
        .cloned()
        .collect()
}

fn uniform_vec3(calls: &CallLog, uniform_name: &str) -> Vec<Vec3<f32>> {
    calls
        .read()
        .iter()
        .filter_map(|call| match call {
            Call::SetVector3f { name, value, .. } if name == uniform_name => Some(*value),
            _ => None,
        })
        .collect()
}

fn uniform_mat4(calls: &CallLog, shader_name: &str, uniform_name: &str) -> Vec<Mat4<f32>> {
    calls
        .read()
        .iter()
        .filter_map(|call| match call {
            Call::SetMatrix4 {
                shader,
                name,
                value,
            } if shader == shader_name && name == uniform_name => Some(*value),
            _ => None,
        })
        .collect()
}

#[test]
fn initialize_sets_viewport_and_creates_sprite_quad() {
    let calls = new_call_log();
    let assets = Arc::new(Assets::new());

    let renderer = SceneRenderer::initialize(
        Box::new(TestDevice::new(calls.clone())),
        assets,
        test_config(),
    );
    assert!(renderer.is_ok());

    assert_eq!(
        vec![
            Call::Initialize,
            Call::SetViewport(1024, 768),
            Call::CreateGeometry {
                number_of_floats: 32,
                index_count: 6
            },
            Call::TakeErrors,
        ],
        *calls.read()
    );
}

#[test]
fn initialize_fails_when_function_loading_fails() {
    let calls = new_call_log();

    let result = SceneRenderer::initialize(
        Box::new(TestDevice::failing(
            calls.clone(),
            InitFailure::FunctionLoading,
        )),
        Arc::new(Assets::new()),
        test_config(),
    );

    assert!(matches!(
        result,
        Err(RendererError::ContextInit(
            ContextInitError::FunctionLoading(_)
        ))
    ));
    assert_eq!(vec![Call::Initialize], *calls.read());
}

#[test]
fn initialize_fails_when_image_subsystem_fails() {
    let calls = new_call_log();

    let result = SceneRenderer::initialize(
        Box::new(TestDevice::failing(calls.clone(), InitFailure::ImageSubsystem)),
        Arc::new(Assets::new()),
        test_config(),
    );

    assert!(matches!(
        result,
        Err(RendererError::ContextInit(ContextInitError::ImageSubsystem(
            _
        )))
    ));
}

#[test]
fn pending_device_errors_do_not_fail_initialization() {
    let calls = new_call_log();
    let device = TestDevice::new(calls.clone()).with_pending_error(DeviceError {
        code: 0x0500,
        description: "invalid enum".to_string(),
    });

    let result =
        SceneRenderer::initialize(Box::new(device), Arc::new(Assets::new()), test_config());

    assert!(result.is_ok());
    assert_eq!(Some(&Call::TakeErrors), calls.read().last());
}

#[test]
fn device_errors_are_drained_after_each_phase() {
    let mut context = init_test();
    add_sprite(&mut context, "one", 1);
    context.renderer.add_mesh(arc_rw_lock_new(TestMesh::new(
        "cube",
        context.calls.clone(),
    )));
    context.calls.write().clear();

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    let calls = context.calls.read().clone();
    let position = |expected: &Call| calls.iter().position(|call| call == expected).unwrap();

    let drains = calls
        .iter()
        .enumerate()
        .filter(|(_, call)| **call == Call::TakeErrors)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    assert_eq!(3, drains.len());

    // begin frame
    assert!(position(&Call::Clear) < drains[0]);
    assert!(drains[0] < position(&Call::SetDepthTest(true)));
    // mesh phase
    assert!(position(&Call::DrawMesh("cube".to_string())) < drains[1]);
    assert!(drains[1] < position(&Call::SetDepthTest(false)));
    // sprite phase
    assert!(position(&Call::DrawIndexedTriangles(6)) < drains[2]);
    assert_eq!(calls.len() - 1, drains[2]);
}

#[test]
fn disabled_validation_never_drains_device_errors() {
    let calls = new_call_log();
    let assets = Arc::new(Assets::new());
    assets.insert_shader(
        PHONG_SHADER_NAME,
        Arc::new(TestShader::new(PHONG_SHADER_NAME, calls.clone())),
    );
    assets.insert_shader(
        SPRITE_SHADER_NAME,
        Arc::new(TestShader::new(SPRITE_SHADER_NAME, calls.clone())),
    );
    let device = TestDevice::new(calls.clone()).with_pending_error(DeviceError {
        code: 0x0502,
        description: "invalid operation".to_string(),
    });
    let config = RendererConfig {
        validate_gpu_calls: false,
        ..test_config()
    };

    let mut renderer = SceneRenderer::initialize(Box::new(device), assets, config).unwrap();
    renderer.begin_frame();
    renderer.draw().unwrap();
    renderer.end_frame();

    assert!(calls_matching(&calls, |call| *call == Call::TakeErrors).is_empty());
}

#[test]
fn begin_frame_clears_with_configured_color() {
    let mut context = init_test();

    context.renderer.begin_frame();

    assert_eq!(
        vec![
            Call::SetClearColor(Rgba::new(0.45, 0.45, 1.0, 1.0)),
            Call::Clear,
            Call::TakeErrors,
        ],
        *context.calls.read()
    );
    assert_eq!(FramePhase::Begun, context.renderer.frame_phase());
}

#[test]
fn mesh_phase_runs_before_sprite_phase() {
    let mut context = init_test();

    context
        .renderer
        .add_mesh(arc_rw_lock_new(TestMesh::new("cube", context.calls.clone())));
    add_sprite(&mut context, "hud", 0);

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    let state_changes = calls_matching(&context.calls, |call| {
        matches!(call, Call::SetDepthTest(_) | Call::SetBlendState(_))
    });
    assert_eq!(
        vec![
            Call::SetDepthTest(true),
            Call::SetBlendState(BlendState::Disabled),
            Call::SetDepthTest(false),
            Call::SetBlendState(BlendState::AlphaBlend),
        ],
        state_changes
    );

    let draws = calls_matching(&context.calls, |call| {
        matches!(call, Call::DrawMesh(_) | Call::DrawIndexedTriangles(_))
    });
    assert_eq!(
        vec![
            Call::DrawMesh("cube".to_string()),
            Call::DrawIndexedTriangles(6)
        ],
        draws
    );

    let programs = calls_matching(&context.calls, |call| matches!(call, Call::UseProgram(_)));
    assert_eq!(
        vec![
            Call::UseProgram(PHONG_SHADER_NAME.to_string()),
            Call::UseProgram(SPRITE_SHADER_NAME.to_string()),
        ],
        programs
    );
}

#[test]
fn mesh_phase_uploads_frame_uniforms_once() {
    let mut context = init_test();

    for name in ["a", "b", "c"] {
        context
            .renderer
            .add_mesh(arc_rw_lock_new(TestMesh::new(name, context.calls.clone())));
    }

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    let view_projections = uniform_mat4(&context.calls, PHONG_SHADER_NAME, "uViewProj");
    assert_eq!(
        vec![*context.renderer.projection_matrix() * *context.renderer.view_matrix()],
        view_projections
    );

    assert_eq!(1, uniform_vec3(&context.calls, "uCameraPos").len());
    assert_eq!(1, uniform_vec3(&context.calls, "uAmbientLight").len());
    assert_eq!(
        3,
        calls_matching(&context.calls, |call| matches!(call, Call::DrawMesh(_))).len()
    );
}

#[test]
fn light_uniforms_reflect_setters() {
    let mut context = init_test();

    let eye = Vec3::new(-10.0, 2.0, 4.0);
    context.renderer.set_view_matrix(Mat4::look_at_rh(
        eye,
        Vec3::new(0.0, 2.0, 4.0),
        Vec3::unit_z(),
    ));
    context
        .renderer
        .set_ambient_light(Vec3::new(0.2, 0.2, 0.2));
    context.renderer.set_directional_light(DirectionalLight {
        direction: Vec3::new(0.0, -0.707, -0.707),
        diffuse_color: Vec3::new(0.78, 0.88, 1.0),
        spec_color: Vec3::new(0.8, 0.8, 0.8),
    });

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    assert_eq!(
        vec![Vec3::new(0.2, 0.2, 0.2)],
        uniform_vec3(&context.calls, "uAmbientLight")
    );
    assert_eq!(
        vec![Vec3::new(0.0, -0.707, -0.707)],
        uniform_vec3(&context.calls, "uDirLight.direction")
    );
    assert_eq!(
        vec![Vec3::new(0.78, 0.88, 1.0)],
        uniform_vec3(&context.calls, "uDirLight.diffuseColor")
    );
    assert_eq!(
        vec![Vec3::new(0.8, 0.8, 0.8)],
        uniform_vec3(&context.calls, "uDirLight.specColor")
    );

    let camera_position = uniform_vec3(&context.calls, "uCameraPos")[0];
    assert_relative_eq!(eye.x, camera_position.x, epsilon = 1e-4);
    assert_relative_eq!(eye.y, camera_position.y, epsilon = 1e-4);
    assert_relative_eq!(eye.z, camera_position.z, epsilon = 1e-4);
}

#[test]
fn sprites_are_composited_in_draw_order() {
    let mut context = init_test();

    add_sprite(&mut context, "seven", 7);
    add_sprite(&mut context, "one", 1);
    add_sprite(&mut context, "five_a", 5);
    add_sprite(&mut context, "three", 3);
    add_sprite(&mut context, "five_b", 5);

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    let textures = calls_matching(&context.calls, |call| {
        matches!(call, Call::SetTextureActive(_))
    });
    assert_eq!(
        ["one", "three", "five_a", "five_b", "seven"]
            .into_iter()
            .map(|name| Call::SetTextureActive(name.to_string()))
            .collect::<Vec<_>>(),
        textures
    );

    assert_eq!(
        1,
        calls_matching(&context.calls, |call| matches!(call, Call::BindGeometry)).len()
    );
    assert_eq!(
        5,
        calls_matching(&context.calls, |call| *call == Call::DrawIndexedTriangles(6)).len()
    );
    assert_eq!(
        vec![*context.renderer.sprite_view_projection()],
        uniform_mat4(&context.calls, SPRITE_SHADER_NAME, "uViewProj")
    );
}

#[test]
fn sprite_world_transform_is_uploaded() {
    let mut context = init_test();

    add_sprite(&mut context, "player", 0);

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    let expected = Mat4::<f32>::translation_3d(Vec3::<f32>::new(-512.0, -384.0, 0.0))
        * Mat4::<f32>::scaling_3d(Vec3::<f32>::new(64.0, 32.0, 1.0));
    assert_eq!(
        vec![expected],
        uniform_mat4(&context.calls, SPRITE_SHADER_NAME, "uWorldTransform")
    );

    let texture_rects = calls_matching(&context.calls, |call| {
        matches!(call, Call::SetVector4f { name, .. } if name == "uTexRect")
    });
    assert_eq!(
        vec![Call::SetVector4f {
            shader: SPRITE_SHADER_NAME.to_string(),
            name: "uTexRect".to_string(),
            value: Vec4::new(0.0, 0.0, 1.0, 1.0),
        }],
        texture_rects
    );
}

#[test]
fn flipped_sprite_with_source_rect_is_uploaded() {
    let mut context = init_test();

    let owner = arc_rw_lock_new(Mat4::<f32>::identity());
    let texture = Arc::new(TestTexture::new("sheet", 128, 64, context.calls.clone()));
    let sprite = SpriteComponent::new(owner, texture, 0)
        .with_source_rect(vek::Rect::new(64.0, 0.0, 64.0, 64.0))
        .with_flip(Flip::Horizontal);
    context.renderer.add_sprite(arc_rw_lock_new(sprite));

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    let expected = Mat4::<f32>::translation_3d(Vec3::<f32>::new(-512.0, -384.0, 0.0))
        * Mat4::<f32>::scaling_3d(Vec3::<f32>::new(-128.0, 64.0, 1.0));
    assert_eq!(
        vec![expected],
        uniform_mat4(&context.calls, SPRITE_SHADER_NAME, "uWorldTransform")
    );
    assert!(context.calls.read().contains(&Call::SetVector4f {
        shader: SPRITE_SHADER_NAME.to_string(),
        name: "uTexRect".to_string(),
        value: Vec4::new(0.5, 0.0, 0.5, 1.0),
    }));
}

#[test]
fn removed_drawables_are_not_drawn() {
    let mut context = init_test();

    let mesh = context
        .renderer
        .add_mesh(arc_rw_lock_new(TestMesh::new("gone", context.calls.clone())));
    let owner = arc_rw_lock_new(Mat4::<f32>::identity());
    let texture = Arc::new(TestTexture::new("gone", 8, 8, context.calls.clone()));
    let sprite = context
        .renderer
        .add_sprite(arc_rw_lock_new(SpriteComponent::new(owner, texture, 0)));

    assert!(context.renderer.remove_mesh(mesh).is_some());
    assert!(context.renderer.remove_sprite(sprite).is_some());

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    assert!(calls_matching(&context.calls, |call| {
        matches!(
            call,
            Call::DrawMesh(_) | Call::DrawIndexedTriangles(_) | Call::SetTextureActive(_)
        )
    })
    .is_empty());
}

#[test]
fn mesh_component_uploads_its_own_uniforms() {
    let mut context = init_test();

    let geometry: Arc<dyn GeometryBuffer> = {
        let mut device = TestDevice::new(context.calls.clone());
        Arc::from(device.create_geometry(&[0.0; 8], &[0, 0, 0]))
    };
    let owner_transform = Mat4::<f32>::translation_3d(Vec3::<f32>::new(200.0, 0.0, 0.0));
    let owner = arc_rw_lock_new(owner_transform);
    let texture = Arc::new(TestTexture::new("cube", 4, 4, context.calls.clone()));

    let visible = arc_rw_lock_new(
        MeshComponent::new(owner.clone(), geometry.clone())
            .with_texture(texture)
            .with_spec_power(10.0),
    );
    let hidden = arc_rw_lock_new(MeshComponent::new(owner, geometry));
    hidden.write().set_visible(false);

    context.renderer.add_mesh(visible);
    context.renderer.add_mesh(hidden);
    context.calls.write().clear();

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();

    assert_eq!(
        vec![owner_transform],
        uniform_mat4(&context.calls, PHONG_SHADER_NAME, "uWorldTransform")
    );
    assert!(context.calls.read().contains(&Call::SetFloat {
        shader: PHONG_SHADER_NAME.to_string(),
        name: "uSpecPower".to_string(),
        value: 10.0,
    }));
    assert_eq!(
        vec![Call::SetTextureActive("cube".to_string())],
        calls_matching(&context.calls, |call| matches!(
            call,
            Call::SetTextureActive(_)
        ))
    );
    assert_eq!(
        1,
        calls_matching(&context.calls, |call| matches!(call, Call::DrawGeometry)).len()
    );
}

#[test]
fn missing_shader_is_reported_before_any_gpu_work() {
    let mut context = init_test();

    context.assets.clear();
    context.assets.insert_shader(
        PHONG_SHADER_NAME,
        Arc::new(TestShader::new(PHONG_SHADER_NAME, context.calls.clone())),
    );

    context.renderer.begin_frame();
    context.calls.write().clear();

    match context.renderer.draw() {
        Err(RendererError::ResourceNotFound { kind, name }) => {
            assert_eq!(ResourceKind::Shader, kind);
            assert_eq!(SPRITE_SHADER_NAME, name);
        }
        other => panic!("unexpected draw result, result = {other:?}"),
    }

    assert!(context.calls.read().is_empty());
}

#[test]
fn missing_texture_is_reported() {
    let assets = Assets::new();

    assert!(matches!(
        assets.texture("Plane"),
        Err(RendererError::ResourceNotFound {
            kind: ResourceKind::Texture,
            ..
        })
    ));
}

#[test]
fn end_frame_presents_and_returns_to_idle() {
    let mut context = init_test();

    context.renderer.begin_frame();
    context.renderer.draw().unwrap();
    assert_eq!(FramePhase::Drawn, context.renderer.frame_phase());

    context.renderer.end_frame();

    assert_eq!(Some(&Call::SwapBuffers), context.calls.read().last());
    assert_eq!(FramePhase::Idle, context.renderer.frame_phase());
}

#[test]
fn out_of_order_phases_still_execute() {
    let mut context = init_test();

    context.renderer.end_frame();
    context.renderer.draw().unwrap();

    let calls = context.calls.read();
    assert_eq!(Call::SwapBuffers, calls[0]);
    assert!(calls.contains(&Call::SetDepthTest(true)));
}

#[test]
fn window_dimensions_update_viewport_and_sprite_projection() {
    let mut context = init_test();

    context.renderer.set_window_dimensions(800, 600);

    assert_eq!(vec![Call::SetViewport(800, 600)], *context.calls.read());
    assert_eq!(Vec2::new(800, 600), context.renderer.window_dimensions());

    let sprite_view_projection = context.renderer.sprite_view_projection();
    assert_relative_eq!(2.0 / 800.0, sprite_view_projection.cols.x.x);
    assert_relative_eq!(2.0 / 600.0, sprite_view_projection.cols.y.y);
}

#[test]
fn zero_window_dimension_is_clamped() {
    let mut context = init_test();

    context.renderer.set_window_dimensions(800, 0);

    assert_eq!(vec![Call::SetViewport(800, 1)], *context.calls.read());
    assert_eq!(Vec2::new(800, 1), context.renderer.window_dimensions());
    assert!(context
        .renderer
        .projection_matrix()
        .into_col_array()
        .iter()
        .all(|value| value.is_finite()));
    assert!(context
        .renderer
        .sprite_view_projection()
        .into_col_array()
        .iter()
        .all(|value| value.is_finite()));
}

#[test]
fn zero_configured_window_height_still_initializes() {
    let calls = new_call_log();
    let config = RendererConfig {
        window_height: 0,
        ..test_config()
    };

    let renderer = SceneRenderer::initialize(
        Box::new(TestDevice::new(calls.clone())),
        Arc::new(Assets::new()),
        config,
    )
    .unwrap();

    assert_eq!(Vec2::new(1024, 1), renderer.window_dimensions());
    assert!(calls.read().contains(&Call::SetViewport(1024, 1)));
}

#[test]
fn close_releases_resources_exactly_once() {
    let mut context = init_test();

    context.renderer.close();
    context.renderer.close();

    assert_eq!(1, context.released_geometries.load(Ordering::SeqCst));
    assert!(context.renderer.is_closed());
    assert!(matches!(context.renderer.draw(), Err(RendererError::Closed)));

    let calls = context.calls.clone();
    let released_geometries = context.released_geometries.clone();
    drop(context);

    assert_eq!(1, released_geometries.load(Ordering::SeqCst));
    assert_eq!(
        vec![Call::DestroyContext],
        calls_matching(&calls, |call| matches!(call, Call::DestroyContext))
    );
}

#[test]
fn close_unregisters_drawables() {
    let mut context = init_test();
    add_sprite(&mut context, "one", 1);
    add_sprite(&mut context, "two", 2);
    assert_eq!(2, context.renderer.registry().number_of_sprites());

    context.renderer.close();

    assert_eq!(0, context.renderer.registry().number_of_sprites());
    assert_eq!(0, context.renderer.registry().number_of_meshes());
}

#[test]
fn dropping_renderer_closes_it() {
    let context = init_test();
    let calls = context.calls.clone();
    let released_geometries = context.released_geometries.clone();

    drop(context);

    assert_eq!(1, released_geometries.load(Ordering::SeqCst));
    assert_eq!(Some(&Call::DestroyContext), calls.read().last());
}
