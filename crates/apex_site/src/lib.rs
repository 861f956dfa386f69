//! # APEX.DEV
//!
//! The portfolio page, built on the headless `apex_ui` runtime:
//! - Content and motion tuning from `config/site.toml`
//! - Nine components stacked by one page shell
//! - Inertial scrolling driven by the host's animation frame
//!
//! ## Page
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ ProgressBar · Navbar · CustomCursor            (fixed)     │
//! ├────────────────────────────────────────────────────────────┤
//! │ Hero        full viewport, parallax headline               │
//! │ Marquee     looping skills band                            │
//! │ Projects    #projects, revealed card grid                  │
//! │ Stats       #about, four badges                            │
//! │ Contact     #contact, mailto + socials                     │
//! │ Footer                                                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use apex_site::{Page, PageEvent, SiteConfig};
//! use apex_ui::{FrameLoop, Viewport};
//!
//! let frames = FrameLoop::new();
//! let mut page = Page::mount(SiteConfig::embedded()?, Viewport::DESKTOP, &frames)?;
//! page.handle_event(PageEvent::Wheel { delta_y: 400.0 });
//! page.frame(0.0);
//! page.frame(16.0);
//! let batches = page.render();
//! # let _ = batches;
//! # Ok::<(), apex_site::SiteError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod components;
pub mod config;
pub mod error;
pub mod page;

pub use config::SiteConfig;
pub use error::{SiteError, SiteResult};
pub use page::{Navigation, Page, PageEvent};
