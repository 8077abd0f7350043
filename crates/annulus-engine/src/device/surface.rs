use winit::dpi::PhysicalSize;

/// Picks the surface format: an sRGB 8-bit format when preferred and
/// available, otherwise the surface's first format.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    const SRGB: [wgpu::TextureFormat; 2] = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];

    let srgb = prefer_srgb
        .then(|| SRGB.into_iter().find(|f| caps.formats.contains(f)))
        .flatten();

    srgb.or_else(|| caps.formats.first().copied())
}

/// Requested alpha mode if supported, else the surface's first, else `Auto`.
pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Size the surface is configured with for a window of `size`; wgpu rejects
/// zero extents, so each axis is at least one pixel.
pub(crate) fn configured_extent(size: PhysicalSize<u32>) -> PhysicalSize<u32> {
    PhysicalSize::new(size.width.max(1), size.height.max(1))
}

/// Records `new_size` and reconfigures the surface.
///
/// wgpu rejects 0x0 surfaces; in that case only the recorded size changes and
/// configuration waits for the next non-zero resize.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as A, TextureFormat as F};

    fn caps(formats: Vec<F>, alpha_modes: Vec<A>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            alpha_modes,
            ..Default::default()
        }
    }

    #[test]
    fn prefers_srgb_when_available() {
        let c = caps(vec![F::Bgra8Unorm, F::Rgba8UnormSrgb], vec![]);
        assert_eq!(choose_surface_format(&c, true), Some(F::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let c = caps(vec![F::Rgba16Float, F::Bgra8Unorm], vec![]);
        assert_eq!(choose_surface_format(&c, true), Some(F::Rgba16Float));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&caps(vec![], vec![]), true), None);
    }

    #[test]
    fn zero_sized_window_configures_one_pixel() {
        assert_eq!(configured_extent(PhysicalSize::new(0, 0)), PhysicalSize::new(1, 1));
        assert_eq!(configured_extent(PhysicalSize::new(640, 0)), PhysicalSize::new(640, 1));
        assert_eq!(configured_extent(PhysicalSize::new(800, 600)), PhysicalSize::new(800, 600));
    }

    #[test]
    fn alpha_mode_selection() {
        let c = caps(vec![], vec![A::Opaque, A::PreMultiplied]);
        assert_eq!(choose_alpha_mode(&c, Some(A::PreMultiplied)), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&c, Some(A::PostMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&c, None), A::Opaque);
        assert_eq!(choose_alpha_mode(&caps(vec![], vec![]), None), A::Auto);
    }
}
