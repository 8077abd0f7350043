//! WGSL program text and stage selection.
//!
//! Each program is a single source text holding both stages. A pipeline picks
//! the stage by entry point name, see [`ShaderStage::entry_point`].

/// Ring program: vertex transform plus the ring discard/fill test.
///
/// Bindings:
/// - group 0, binding 0: camera uniform (`projection`, `view`), vertex stage
///
/// Vertex inputs:
/// - location 0: quad position (per vertex)
/// - locations 1..=4: model matrix columns (per instance)
/// - location 5: color (per instance)
/// - location 6: inner ratio (per instance)
pub const RING_WGSL: &str = include_str!("ring.wgsl");

/// Full-screen upscale of the pixel target (nearest sampling).
pub const BLIT_WGSL: &str = include_str!("blit.wgsl");

/// Pipeline stage a program is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point compiled for this stage. Shared by every program in this module.
    #[inline]
    pub const fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }

    #[inline]
    pub const fn wgpu_stages(self) -> wgpu::ShaderStages {
        match self {
            ShaderStage::Vertex => wgpu::ShaderStages::VERTEX,
            ShaderStage::Fragment => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

/// Creates a shader module from WGSL source.
///
/// Compile errors are reported by wgpu's device validation.
pub fn create_module(device: &wgpu::Device, label: &str, source: &'static str) -> wgpu::ShaderModule {
    log::debug!("compiling shader module `{label}`");
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_validate(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("WGSL parse error: {}", e.emit_to_string(source)));

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .unwrap_or_else(|e| panic!("WGSL validation error: {e:?}"));

        module
    }

    fn has_entry_point(module: &naga::Module, stage: ShaderStage) -> bool {
        let expected = match stage {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        };
        module
            .entry_points
            .iter()
            .any(|ep| ep.name == stage.entry_point() && ep.stage == expected)
    }

    #[test]
    fn ring_program_validates() {
        parse_and_validate(RING_WGSL);
    }

    #[test]
    fn blit_program_validates() {
        parse_and_validate(BLIT_WGSL);
    }

    #[test]
    fn ring_program_has_both_stages() {
        let module = parse_and_validate(RING_WGSL);
        assert!(has_entry_point(&module, ShaderStage::Vertex));
        assert!(has_entry_point(&module, ShaderStage::Fragment));
        assert_eq!(module.entry_points.len(), 2);
    }

    #[test]
    fn blit_program_has_both_stages() {
        let module = parse_and_validate(BLIT_WGSL);
        assert!(has_entry_point(&module, ShaderStage::Vertex));
        assert!(has_entry_point(&module, ShaderStage::Fragment));
    }

    // ── IR checks against the CPU reference ──────────────────────────────

    use naga::{BinaryOperator, Expression, Handle, Literal, MathFunction, Statement};

    fn entry_function(module: &naga::Module, stage: ShaderStage) -> &naga::Function {
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.name == stage.entry_point())
            .unwrap_or_else(|| panic!("missing entry point {}", stage.entry_point()));
        &ep.function
    }

    fn float_literal(f: &naga::Function, h: Handle<Expression>) -> Option<f64> {
        match f.expressions[h] {
            Expression::Literal(Literal::F32(v)) => Some(v as f64),
            Expression::Literal(Literal::AbstractFloat(v)) => Some(v),
            _ => None,
        }
    }

    fn binary(
        f: &naga::Function,
        h: Handle<Expression>,
    ) -> Option<(BinaryOperator, Handle<Expression>, Handle<Expression>)> {
        match f.expressions[h] {
            Expression::Binary { op, left, right } => Some((op, left, right)),
            _ => None,
        }
    }

    /// Member index of a value loaded from a uniform struct.
    fn uniform_member(f: &naga::Function, h: Handle<Expression>) -> Option<u32> {
        let Expression::Load { pointer } = f.expressions[h] else { return None };
        match f.expressions[pointer] {
            Expression::AccessIndex { base, index }
                if matches!(f.expressions[base], Expression::GlobalVariable(_)) =>
            {
                Some(index)
            }
            _ => None,
        }
    }

    /// Conditions of every `if` whose body discards.
    fn discard_conditions(block: &naga::Block, out: &mut Vec<Handle<Expression>>) {
        for stmt in block.iter() {
            if let Statement::If { condition, accept, reject } = stmt {
                if accept.iter().any(|s| matches!(s, Statement::Kill)) {
                    out.push(*condition);
                }
                discard_conditions(accept, out);
                discard_conditions(reject, out);
            }
        }
    }

    #[test]
    fn ring_fragment_matches_reference_test() {
        let module = parse_and_validate(RING_WGSL);
        let f = entry_function(&module, ShaderStage::Fragment);

        let mut conditions = Vec::new();
        discard_conditions(&f.body, &mut conditions);
        assert_eq!(conditions.len(), 2, "expected two discard branches");

        // Outer test first: strict `len > 1.0`.
        let (op, len, one) = binary(f, conditions[0]).expect("outer test is a comparison");
        assert_eq!(op, BinaryOperator::Greater);
        assert_eq!(float_literal(f, one), Some(1.0));

        // Then strict `len < inner`, on the same length.
        let (op, len2, inner) = binary(f, conditions[1]).expect("inner test is a comparison");
        assert_eq!(op, BinaryOperator::Less);
        assert_eq!(len, len2);
        assert!(matches!(f.expressions[inner], Expression::AccessIndex { .. }));

        // len = length(uv - center) * 2.0
        let (op, dist, two) = binary(f, len).expect("len is a product");
        assert_eq!(op, BinaryOperator::Multiply);
        assert_eq!(float_literal(f, two), Some(2.0));
        assert!(matches!(
            f.expressions[dist],
            Expression::Math { fun: MathFunction::Length, .. }
        ));
    }

    #[test]
    fn ring_vertex_matches_reference_transform() {
        let module = parse_and_validate(RING_WGSL);
        let f = entry_function(&module, ShaderStage::Vertex);
        let handles = || f.expressions.iter().map(|(h, _)| h);

        // projection * (view * (model * p)), projection = member 0, view = member 1.
        let outer = handles()
            .find(|&h| {
                binary(f, h).is_some_and(|(op, l, _)| {
                    op == BinaryOperator::Multiply && uniform_member(f, l) == Some(0)
                })
            })
            .expect("projection multiply");
        let (_, _, view_mul) = binary(f, outer).expect("binary");
        let (op, view, model_mul) = binary(f, view_mul).expect("view multiply");
        assert_eq!(op, BinaryOperator::Multiply);
        assert_eq!(uniform_member(f, view), Some(1));
        let (op, model, _) = binary(f, model_mul).expect("model multiply");
        assert_eq!(op, BinaryOperator::Multiply);
        assert!(matches!(f.expressions[model], Expression::Compose { .. }));

        // uv.y = 1.0 - in.pos.y
        let flip = handles().any(|h| {
            binary(f, h).is_some_and(|(op, l, r)| {
                op == BinaryOperator::Subtract
                    && float_literal(f, l) == Some(1.0)
                    && matches!(f.expressions[r], Expression::AccessIndex { index: 1, .. })
            })
        });
        assert!(flip, "vertical flip `1.0 - pos.y` not found");
    }

    #[test]
    fn stage_entry_points_are_distinct() {
        assert_ne!(
            ShaderStage::Vertex.entry_point(),
            ShaderStage::Fragment.entry_point()
        );
        assert_eq!(ShaderStage::Vertex.wgpu_stages(), wgpu::ShaderStages::VERTEX);
    }
}
