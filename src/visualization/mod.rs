pub mod sandbox_vis3d;
