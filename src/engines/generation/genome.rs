/// Genome representation for the melody search
///
/// A genome is a fixed-length sequence of integers, one per beat slot
/// (`number_of_bars * beats_per_bar`). Each gene is read by the `MelodyRenderer`
/// as an index into the active scale's pitch list at the moment its beat slot is
/// consumed.
///
/// Genes normally lie in `[0, scale_size)`, but any `u32` is accepted: the renderer
/// wraps values modulo the scale size, so mutation may explore the whole integer
/// domain without producing an undecodable genome.
///
/// Crossover and mutation edit genomes in place; a genome is never resized.
///
/// # Example
///
/// ```
/// let genome: melodyevo::engines::generation::Genome = vec![0, 2, 4, 0];
/// // In C major with one 4/4 bar this reads C4, E4, G4, C4 at beats 0..4
/// assert_eq!(genome.len(), 4);
/// ```
pub type Genome = Vec<u32>;
