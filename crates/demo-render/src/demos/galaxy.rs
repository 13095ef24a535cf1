use super::{Demo, RenderContext};
use crate::points::GpuPoints;
use crate::scene::{RenderObject, RenderScene};
use demo_core::{
    galaxy, DemoError, DemoKind, GalaxyParams, ParamSet, ParamValue, PointsMaterial, ReplaceableNode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Spiral point cloud rebuilt from scratch whenever a parameter settles.
pub struct GalaxyDemo {
    params: GalaxyParams,
    controls: ParamSet,
    rng: StdRng,
    scene: RenderScene,
    points: ReplaceableNode,
}

impl GalaxyDemo {
    pub(crate) fn new(ctx: &RenderContext<'_>, seed: Option<u64>) -> Self {
        let params = GalaxyParams::default();
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut demo = Self {
            controls: params.param_set(),
            params,
            rng,
            scene: RenderScene::new(),
            points: ReplaceableNode::new(),
        };
        demo.regenerate(ctx);
        demo
    }

    /// Drop the current cloud and its buffers, then generate and upload a
    /// fresh one from the current parameters.
    fn regenerate(&mut self, ctx: &RenderContext<'_>) {
        let Self {
            params,
            rng,
            scene,
            points,
            ..
        } = self;
        points.regenerate(&mut scene.nodes, || {
            let cloud = galaxy::generate(params, rng);
            let material = PointsMaterial::glowing(params.size);
            RenderObject::Points(GpuPoints::new(ctx.device, ctx.pipelines, &cloud, material))
        });
        log::info!(
            "[galaxy] generated {} points, {} branches",
            self.params.count,
            self.params.branches
        );
    }
}

impl Demo for GalaxyDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Galaxy
    }

    fn params(&self) -> &ParamSet {
        &self.controls
    }

    fn set_param(
        &mut self,
        ctx: &RenderContext<'_>,
        name: &str,
        value: ParamValue,
    ) -> Result<ParamValue, DemoError> {
        let stored = self.controls.set(name, value)?;
        if self.params.apply(name, stored) {
            self.regenerate(ctx);
        }
        Ok(stored)
    }

    fn scene(&self) -> &RenderScene {
        &self.scene
    }
}
