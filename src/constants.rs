//! Constants used throughout the library

/// Number of body landmarks produced by the pose estimator
pub const NUM_JOINTS: usize = 17;

/// Number of limb vectors used by the similarity metric
pub const NUM_LIMBS: usize = 12;

/// Number of leading face landmarks (nose, eyes, ears) that are not drawn as dots
pub const NUM_FACE_JOINTS: usize = 5;

/// Default window sizes for the streaming comparator
pub const DEFAULT_WAITING_WINDOW: usize = 15;
pub const DEFAULT_COACH_BUFFER: usize = 15;
pub const DEFAULT_TRAILING_COMPARE: usize = 15;

/// Squared cosine distance above which a limb counts as deviated
pub const DEFAULT_DEVIATION_THRESHOLD: f64 = 0.03;

/// Scores below this value count as a good step
pub const DEFAULT_EVALUATION_THRESHOLD: f64 = 1.3;

/// Mean keypoint confidence below which no skeleton is drawn
pub const DEFAULT_OVERLAY_THRESHOLD: f64 = 0.2;

/// Score reported before the first match has been made
pub const NO_SCORE: f64 = -1.0;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
