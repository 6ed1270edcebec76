/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available. Off by default: egui
    /// blends in gamma space and expects a linear (non-sRGB) target.
    pub prefer_srgb: bool,

    /// Present mode. FIFO is vsync and supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Ask for a compositing alpha mode so a transparent clear color shows the
    /// desktop behind the window. Falls back to opaque when unsupported.
    pub transparent: bool,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            transparent: true,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
