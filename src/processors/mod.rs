pub mod densifier;
pub mod mask_filter;
pub mod output_assembler;

pub use densifier::Densifier;
pub use mask_filter::{MaskFilter, MaskMode};
pub use output_assembler::OutputAssembler;
