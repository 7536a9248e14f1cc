/// Reads genes from a genome by beat-slot offset
pub struct GeneConsumer<'a> {
    genome: &'a [u32],
    position: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(genome: &'a [u32]) -> Self {
        Self { genome, position: 0 }
    }

    /// Move to an absolute offset. Offsets past the end wrap around.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Consume next gene and return value
    pub fn consume(&mut self) -> u32 {
        if self.genome.is_empty() {
            return 0;
        }
        if self.position >= self.genome.len() {
            // Wrap around if genome exhausted
            self.position %= self.genome.len();
        }

        let gene = self.genome[self.position];
        self.position += 1;
        gene
    }

    /// Consume gene and map to choice index
    pub fn choose(&mut self, num_choices: usize) -> usize {
        if num_choices == 0 {
            return 0;
        }
        (self.consume() as usize) % num_choices
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_wraps_gene_values() {
        let genome = [3, 11, u32::MAX];
        let mut consumer = GeneConsumer::new(&genome);
        assert_eq!(consumer.choose(8), 3);
        assert_eq!(consumer.choose(8), 3);
        assert_eq!(consumer.choose(8), (u32::MAX % 8) as usize);
    }

    #[test]
    fn test_seek_past_end_wraps() {
        let genome = [5, 6, 7];
        let mut consumer = GeneConsumer::new(&genome);
        consumer.seek(4);
        assert_eq!(consumer.consume(), 6);
        assert_eq!(consumer.position(), 2);
    }

    #[test]
    fn test_empty_genome_reads_zero() {
        let mut consumer = GeneConsumer::new(&[]);
        assert_eq!(consumer.choose(8), 0);
    }
}
