use crate::engines::generation::{genome::Genome, individual::Individual};
use rand::Rng;

/// Truncation selection: keep the `k` lowest-fitness individuals.
///
/// The sort is stable, so ties keep their original order.
pub fn select_best(population: &[Individual], k: usize) -> Vec<Individual> {
    let mut sorted = population.to_vec();
    sorted.sort_by(|a, b| a.rank_key().total_cmp(&b.rank_key()));
    sorted.truncate(k);
    sorted
}

/// Two-point crossover: swap the segment between two random cut points.
///
/// Cut points are drawn so that `1 <= p1 < p2 <= len`. Returns the cut points
/// used, or `None` when the genomes are too short to cut twice.
pub fn two_point_crossover<R: Rng>(
    parent1: &mut [u32],
    parent2: &mut [u32],
    rng: &mut R,
) -> Option<(usize, usize)> {
    let len = parent1.len().min(parent2.len());
    if len < 2 {
        return None;
    }

    let mut p1 = rng.gen_range(1..=len);
    let mut p2 = rng.gen_range(1..len);
    if p2 >= p1 {
        p2 += 1;
    } else {
        std::mem::swap(&mut p1, &mut p2);
    }

    crossover_segment(parent1, parent2, p1, p2);
    Some((p1, p2))
}

/// Swap `[p1, p2)` between two genomes in place.
pub fn crossover_segment(parent1: &mut [u32], parent2: &mut [u32], p1: usize, p2: usize) {
    let end = p2.min(parent1.len()).min(parent2.len());
    if p1 >= end {
        return;
    }
    parent1[p1..end].swap_with_slice(&mut parent2[p1..end]);
}

/// Mutation: redraw each gene with probability `mutation_rate`
pub fn mutate<R: Rng>(
    genome: &mut [u32],
    mutation_rate: f64,
    gene_range: std::ops::Range<u32>,
    rng: &mut R,
) {
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = rng.gen_range(gene_range.clone());
        }
    }
}

/// Generate random genome
pub fn random_genome<R: Rng>(
    length: usize,
    gene_range: std::ops::Range<u32>,
    rng: &mut R,
) -> Genome {
    (0..length)
        .map(|_| rng.gen_range(gene_range.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn evaluated(genome: Genome, fitness: f64) -> Individual {
        let mut individual = Individual::new(genome);
        individual.set_fitness(fitness);
        individual
    }

    #[test]
    fn test_select_best_truncates_by_fitness() {
        let population: Vec<Individual> = [5.0, 1.0, 4.0, 2.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &f)| evaluated(vec![i as u32], f))
            .collect();

        let selected = select_best(&population, 3);
        let fitness: Vec<f64> = selected.iter().filter_map(Individual::fitness).collect();
        let genomes: Vec<u32> = selected.iter().map(|i| i.genome()[0]).collect();
        assert_eq!(fitness, vec![1.0, 2.0, 3.0]);
        assert_eq!(genomes, vec![1, 3, 4]);
    }

    #[test]
    fn test_select_best_ties_are_stable() {
        let population = vec![
            evaluated(vec![0], 2.0),
            evaluated(vec![1], 1.0),
            evaluated(vec![2], 2.0),
            evaluated(vec![3], 2.0),
        ];
        let selected = select_best(&population, 3);
        let genomes: Vec<u32> = selected.iter().map(|i| i.genome()[0]).collect();
        assert_eq!(genomes, vec![1, 0, 2]);
    }

    #[test]
    fn test_select_best_ranks_unevaluated_last() {
        let population = vec![Individual::new(vec![9]), evaluated(vec![1], 5.0)];
        let selected = select_best(&population, 1);
        assert_eq!(selected[0].genome(), &[1]);
    }

    #[test]
    fn test_crossover_segment_swaps_inside_cut_points() {
        let mut a: Vec<u32> = vec![0, 1, 2, 3, 4, 5];
        let mut b: Vec<u32> = vec![10, 11, 12, 13, 14, 15];
        crossover_segment(&mut a, &mut b, 2, 5);
        assert_eq!(a, vec![0, 1, 12, 13, 14, 5]);
        assert_eq!(b, vec![10, 11, 2, 3, 4, 15]);
    }

    #[test]
    fn test_two_point_crossover_preserves_length_and_genes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let original_a: Vec<u32> = (0..16).collect();
            let original_b: Vec<u32> = (100..116).collect();
            let mut a = original_a.clone();
            let mut b = original_b.clone();

            let (p1, p2) = two_point_crossover(&mut a, &mut b, &mut rng).unwrap();
            assert!(1 <= p1 && p1 < p2 && p2 <= 16);
            assert_eq!(a.len(), 16);
            assert_eq!(b.len(), 16);
            for i in 0..16 {
                if (p1..p2).contains(&i) {
                    assert_eq!(a[i], original_b[i]);
                    assert_eq!(b[i], original_a[i]);
                } else {
                    assert_eq!(a[i], original_a[i]);
                    assert_eq!(b[i], original_b[i]);
                }
            }
        }
    }

    #[test]
    fn test_two_point_crossover_short_genomes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut a = vec![1];
        let mut b = vec![2];
        assert_eq!(two_point_crossover(&mut a, &mut b, &mut rng), None);
        assert_eq!((a[0], b[0]), (1, 2));
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let original = random_genome(32, 0..8, &mut rng);
        let mut genome = original.clone();
        mutate(&mut genome, 0.0, 0..8, &mut rng);
        assert_eq!(genome, original);
    }

    #[test]
    fn test_mutation_rate_one_redraws_every_gene() {
        let mut rng = StdRng::seed_from_u64(5);
        // Out-of-range sentinels make every redraw observable.
        let mut genome = vec![1_000u32; 64];
        mutate(&mut genome, 1.0, 0..8, &mut rng);
        assert!(genome.iter().all(|&g| g < 8));
    }

    #[test]
    fn test_random_genome_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let genome = random_genome(100, 0..8, &mut rng);
        assert_eq!(genome.len(), 100);
        assert!(genome.iter().all(|&g| g < 8));
    }
}
