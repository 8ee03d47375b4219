//! Real-time motion comparison against a recorded reference performance.
//!
//! A live stream of body poses (one [`frame::Frame`] of 17 joint coordinates per
//! camera frame) is aligned on the fly against a pre-recorded "coach" sequence
//! using streaming dynamic time warping. Every aligned step yields a running
//! similarity score and the set of limbs whose orientation deviates from the
//! reference.
//!
//! The pipeline consists of:
//! 1. A limb-orientation similarity metric between two frames
//! 2. A DTW aligner over small windows of frames
//! 3. A streaming comparator sliding those windows over both sequences
//! 4. A session facade that loads the reference and scores each step
//!
//! Pose estimation, video and rendering are left to the caller.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use motion_coach::{config::Config, frame::Frame, session::Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut session = Session::open("assets/coach.json", &config)?;
//!
//! // Coordinates from the pose estimator, in joint order
//! let positions = vec![[0.5, 0.5]; 17];
//! let frame = Frame::from_positions(&positions)?;
//!
//! let step = session.receive_frame(&frame);
//! if step.matched {
//!     println!("Score: {:.3}", step.score);
//!     println!("Deviated limbs: {:?}", session.deviated_limbs());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Aligning Sequences Directly
//!
//! ```
//! use motion_coach::dtw::dtw;
//!
//! let x = [0.0, 1.0, 1.0, 2.0];
//! let y = [0.0, 1.0, 2.0];
//! let alignment = dtw(&x, &y, |a: &f64, b: &f64| (a - b).abs());
//!
//! assert_eq!(alignment.cost, 0.0);
//! assert_eq!(alignment.path.first(), Some(&(0, 0)));
//! assert_eq!(alignment.path.last(), Some(&(3, 2)));
//! ```
//!
//! ## Feeding Frames From a Camera Thread
//!
//! ```no_run
//! use motion_coach::{config::Config, dispatch::FrameDispatcher, frame::Frame, session::Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::open("assets/coach.json", &Config::default())?;
//! let mut dispatcher = FrameDispatcher::spawn(session)?;
//!
//! let frame = Frame::from_positions(&vec![[0.5, 0.5]; 17])?;
//! if !dispatcher.submit(frame) {
//!     // worker still busy with the previous frame
//! }
//! while let Some(update) = dispatcher.try_recv_update() {
//!     if update.finished {
//!         println!("Workout complete");
//!     }
//! }
//!
//! let session = dispatcher.finish()?;
//! println!("{:?}", session.report());
//! # Ok(())
//! # }
//! ```

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Body landmark enumeration
pub mod joint;

/// Limb vectors between landmarks
pub mod skeleton;

/// Single-pose frames
pub mod frame;

/// Limb-orientation similarity metric
pub mod metric;

/// Dynamic time warping aligner
pub mod dtw;

/// Streaming comparator state machine
pub mod comparator;

/// Reference sequence loading
pub mod reference;

/// Step evaluation tally
pub mod scoring;

/// Skeleton overlay drawing data
pub mod overlay;

/// Session facade
pub mod session;

/// Drop-when-busy frame dispatch onto a worker thread
pub mod dispatch;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
