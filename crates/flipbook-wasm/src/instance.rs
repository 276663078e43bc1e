use flipbook_core::particle::Particle;

/// Per-particle instance record for WebGL shells: 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    position: [f32; 2], //  8 bytes
    size: f32,          //  4 bytes
    angle: f32,         //  4 bytes
    color: [f32; 4],    // 16 bytes
}

impl From<&Particle> for ParticleInstance {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            size: p.size,
            angle: p.angle,
            color: p.color.to_array(),
        }
    }
}

/// Flat buffer the shell reads straight out of wasm memory.
#[derive(Default)]
pub struct InstanceBuffer {
    instances: Vec<ParticleInstance>,
}

impl InstanceBuffer {
    pub fn write(&mut self, particles: &[Particle]) {
        self.instances.clear();
        self.instances.extend(particles.iter().map(ParticleInstance::from));
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
