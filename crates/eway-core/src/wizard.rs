// ── Purchase wizard ──
//
// Details → RouteAndDuration → Payment → Issued.
//
// Raw form input lives in a `TicketDraft`; each step carries the validated
// data of the steps before it, so a step can only exist once its guards have
// passed. Going back keeps the draft, and editing a field that an earlier
// step validated rewinds the wizard to that step.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::attachment::{Attachment, AttachmentKind, UploadState};
use crate::issuance::issue_record;
use crate::model::{
    PassDuration, PaymentMethod, Price, RiderCategory, Station, TicketRecord,
};
use crate::pricing::compute_price;
use crate::validity::{ValidityWindow, compute_end_date};

// ── Errors ──────────────────────────────────────────────────────────

/// A blocked transition. The message is meant for the rider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Please enter your full name")]
    MissingName,

    #[error("Please select a rider category (adult or student)")]
    MissingCategory,

    #[error("Please upload your {kind}")]
    MissingDocument { kind: AttachmentKind },

    #[error("Your {kind} has not finished uploading")]
    DocumentPending { kind: AttachmentKind },

    #[error("Your {kind} could not be uploaded: {reason}")]
    DocumentFailed { kind: AttachmentKind, reason: String },

    #[error("Start and end locations cannot be the same ({station})")]
    SameEndpoints { station: Station },

    #[error("Please select a start date")]
    MissingStartDate,

    #[error("Start date {start} is in the past (today is {today})")]
    StartDateInPast { start: NaiveDate, today: NaiveDate },

    #[error("No validity window can be computed from {start}")]
    InvalidStartDate { start: NaiveDate },

    #[error("Please select a payment method")]
    MissingPayment,

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("The pass has already been issued; reset to book another")]
    AlreadyIssued,

    #[error("Cannot go back to {target}: it has not been reached yet")]
    NotReached { target: StepKind },
}

// ── Validated step data ─────────────────────────────────────────────

/// Who the pass is for, after the details step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    name: String,
    category: RiderCategory,
}

impl Passenger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> RiderCategory {
        self.category
    }
}

/// A pair of distinct stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    origin: Station,
    destination: Station,
}

impl Route {
    pub fn new(origin: Station, destination: Station) -> Result<Self, WizardError> {
        if origin == destination {
            return Err(WizardError::SameEndpoints { station: origin });
        }
        Ok(Self {
            origin,
            destination,
        })
    }

    pub fn origin(&self) -> Station {
        self.origin
    }

    pub fn destination(&self) -> Station {
        self.destination
    }
}

/// Route, duration, validity window and the resulting price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    route: Route,
    duration: PassDuration,
    window: ValidityWindow,
    price: Price,
}

impl Trip {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn duration(&self) -> PassDuration {
        self.duration
    }

    pub fn window(&self) -> ValidityWindow {
        self.window
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

// ── Steps ───────────────────────────────────────────────────────────

/// Step labels, ordered by progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepKind {
    Details,
    RouteAndDuration,
    Payment,
    Issued,
}

impl StepKind {
    /// One-based position, for "Step n of 4" displays.
    pub fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::RouteAndDuration => 2,
            Self::Payment => 3,
            Self::Issued => 4,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Details => "passenger details",
            Self::RouteAndDuration => "route & duration",
            Self::Payment => "payment",
            Self::Issued => "issued pass",
        })
    }
}

#[derive(Debug, Clone)]
pub enum Step {
    Details,
    RouteAndDuration { passenger: Passenger },
    Payment { passenger: Passenger, trip: Trip },
    Issued { record: TicketRecord },
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Details => StepKind::Details,
            Self::RouteAndDuration { .. } => StepKind::RouteAndDuration,
            Self::Payment { .. } => StepKind::Payment,
            Self::Issued { .. } => StepKind::Issued,
        }
    }
}

// ── Draft ───────────────────────────────────────────────────────────

/// Everything the rider has entered so far, valid or not.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    full_name: String,
    category: Option<RiderCategory>,
    id_photo: Option<Attachment>,
    student_document: Option<Attachment>,
    origin: Station,
    destination: Station,
    duration: PassDuration,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    payment: Option<PaymentMethod>,
}

impl Default for TicketDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            category: None,
            id_photo: None,
            student_document: None,
            origin: Station::Colombo,
            destination: Station::Galle,
            duration: PassDuration::Week,
            start_date: None,
            end_date: None,
            payment: None,
        }
    }
}

impl TicketDraft {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn category(&self) -> Option<RiderCategory> {
        self.category
    }

    pub fn attachment(&self, kind: AttachmentKind) -> Option<&Attachment> {
        match kind {
            AttachmentKind::IdPhoto => self.id_photo.as_ref(),
            AttachmentKind::StudentDocument => self.student_document.as_ref(),
        }
    }

    pub fn origin(&self) -> Station {
        self.origin
    }

    pub fn destination(&self) -> Station {
        self.destination
    }

    pub fn duration(&self) -> PassDuration {
        self.duration
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Derived from start date and duration; there is no setter.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn payment(&self) -> Option<PaymentMethod> {
        self.payment
    }

    /// Live price for the current input. Riders without a category yet
    /// are quoted the adult fare.
    pub fn price(&self) -> Price {
        compute_price(
            self.origin,
            self.destination,
            self.duration,
            self.category.unwrap_or(RiderCategory::Adult),
        )
    }

    fn recompute_end_date(&mut self) {
        self.end_date = compute_end_date(self.start_date, self.duration);
    }

    fn passenger(&self) -> Result<Passenger, WizardError> {
        let name = self.full_name.trim();
        if name.is_empty() {
            return Err(WizardError::MissingName);
        }
        let category = self.category.ok_or(WizardError::MissingCategory)?;
        let kind = AttachmentKind::required_for(category);
        match self.attachment(kind).map(Attachment::state) {
            None => return Err(WizardError::MissingDocument { kind }),
            Some(UploadState::Pending) => return Err(WizardError::DocumentPending { kind }),
            Some(UploadState::Failed { reason }) => {
                return Err(WizardError::DocumentFailed {
                    kind,
                    reason: reason.clone(),
                });
            }
            Some(UploadState::Uploaded { .. }) => {}
        }
        Ok(Passenger {
            name: name.to_owned(),
            category,
        })
    }

    fn trip(&self, category: RiderCategory, today: NaiveDate) -> Result<Trip, WizardError> {
        let route = Route::new(self.origin, self.destination)?;
        let start = self.start_date.ok_or(WizardError::MissingStartDate)?;
        if start < today {
            return Err(WizardError::StartDateInPast { start, today });
        }
        let window = ValidityWindow::starting(start, self.duration)
            .ok_or(WizardError::InvalidStartDate { start })?;
        Ok(Trip {
            route,
            duration: self.duration,
            window,
            price: compute_price(route.origin, route.destination, self.duration, category),
        })
    }
}

// ── Wizard ──────────────────────────────────────────────────────────

/// One in-progress purchase.
#[derive(Debug, Clone)]
pub struct Wizard {
    draft: TicketDraft,
    step: Step,
    created_by: u64,
}

impl Wizard {
    /// A fresh wizard whose record will name `created_by` as its owner.
    pub fn new(created_by: u64) -> Self {
        Self {
            draft: TicketDraft::default(),
            step: Step::Details,
            created_by,
        }
    }

    pub fn draft(&self) -> &TicketDraft {
        &self.draft
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn kind(&self) -> StepKind {
        self.step.kind()
    }

    /// The issued record, once the wizard is complete.
    pub fn record(&self) -> Option<&TicketRecord> {
        match &self.step {
            Step::Issued { record } => Some(record),
            _ => None,
        }
    }

    /// Live quote for the current input.
    pub fn price(&self) -> Price {
        self.draft.price()
    }

    // ── Field edits ─────────────────────────────────────────────────

    pub fn set_full_name(&mut self, name: impl Into<String>) -> Result<(), WizardError> {
        self.editable()?;
        self.draft.full_name = name.into();
        self.rewind_to(StepKind::Details);
        Ok(())
    }

    pub fn set_category(&mut self, category: RiderCategory) -> Result<(), WizardError> {
        self.editable()?;
        self.draft.category = Some(category);
        self.rewind_to(StepKind::Details);
        Ok(())
    }

    /// Attach a proof document, replacing any earlier one of the same kind.
    pub fn attach(&mut self, attachment: Attachment) -> Result<(), WizardError> {
        self.editable()?;
        match attachment.kind() {
            AttachmentKind::IdPhoto => self.draft.id_photo = Some(attachment),
            AttachmentKind::StudentDocument => self.draft.student_document = Some(attachment),
        }
        self.rewind_to(StepKind::Details);
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Station) -> Result<(), WizardError> {
        self.editable()?;
        self.draft.origin = origin;
        self.rewind_to(StepKind::RouteAndDuration);
        Ok(())
    }

    pub fn set_destination(&mut self, destination: Station) -> Result<(), WizardError> {
        self.editable()?;
        self.draft.destination = destination;
        self.rewind_to(StepKind::RouteAndDuration);
        Ok(())
    }

    pub fn set_duration(&mut self, duration: PassDuration) -> Result<(), WizardError> {
        self.editable()?;
        self.draft.duration = duration;
        self.draft.recompute_end_date();
        self.rewind_to(StepKind::RouteAndDuration);
        Ok(())
    }

    pub fn set_start_date(&mut self, start: NaiveDate) -> Result<(), WizardError> {
        self.editable()?;
        self.draft.start_date = Some(start);
        self.draft.recompute_end_date();
        self.rewind_to(StepKind::RouteAndDuration);
        Ok(())
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) -> Result<(), WizardError> {
        self.editable()?;
        self.draft.payment = Some(payment);
        Ok(())
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Move forward one step, using the local clock.
    pub fn advance(&mut self) -> Result<StepKind, WizardError> {
        self.advance_at(Local::now())
    }

    /// Move forward one step as of `now`.
    ///
    /// Leaving `Payment` issues the record. A blocked transition leaves the
    /// wizard exactly as it was.
    pub fn advance_at(&mut self, now: DateTime<Local>) -> Result<StepKind, WizardError> {
        let next = match &self.step {
            Step::Details => Step::RouteAndDuration {
                passenger: self.draft.passenger()?,
            },
            Step::RouteAndDuration { passenger } => {
                let trip = self.draft.trip(passenger.category, now.date_naive())?;
                Step::Payment {
                    passenger: passenger.clone(),
                    trip,
                }
            }
            Step::Payment { passenger, trip } => {
                let payment = self.draft.payment.ok_or(WizardError::MissingPayment)?;
                Step::Issued {
                    record: issue_record(passenger, trip, payment, self.created_by, now),
                }
            }
            Step::Issued { .. } => return Err(WizardError::AlreadyIssued),
        };
        self.step = next;
        debug!(step = %self.step.kind(), "wizard advanced");
        Ok(self.step.kind())
    }

    /// Go back one step. Entered data is kept.
    pub fn back(&mut self) -> Result<StepKind, WizardError> {
        match self.step {
            Step::Details => Err(WizardError::AtFirstStep),
            Step::Issued { .. } => Err(WizardError::AlreadyIssued),
            Step::RouteAndDuration { .. } | Step::Payment { .. } => {
                self.step_back();
                Ok(self.step.kind())
            }
        }
    }

    /// Jump back to any step already passed.
    pub fn back_to(&mut self, target: StepKind) -> Result<(), WizardError> {
        self.editable()?;
        if target > self.step.kind() {
            return Err(WizardError::NotReached { target });
        }
        self.rewind_to(target);
        Ok(())
    }

    /// Clear every field and discard any issued record.
    pub fn reset(&mut self) {
        self.draft = TicketDraft::default();
        self.step = Step::Details;
        debug!("wizard reset");
    }

    fn editable(&self) -> Result<(), WizardError> {
        match self.step {
            Step::Issued { .. } => Err(WizardError::AlreadyIssued),
            _ => Ok(()),
        }
    }

    fn rewind_to(&mut self, target: StepKind) {
        while self.step.kind() > target && !matches!(self.step, Step::Issued { .. }) {
            self.step_back();
        }
    }

    fn step_back(&mut self) {
        self.step = match std::mem::replace(&mut self.step, Step::Details) {
            Step::Payment { passenger, .. } => Step::RouteAndDuration { passenger },
            Step::RouteAndDuration { .. } | Step::Details => Step::Details,
            issued @ Step::Issued { .. } => issued,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TicketStatus;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap()
    }

    fn id_photo() -> Attachment {
        Attachment::from_bytes(AttachmentKind::IdPhoto, "id.jpg", b"jpeg")
    }

    fn student_doc() -> Attachment {
        Attachment::from_bytes(AttachmentKind::StudentDocument, "card.pdf", b"pdf")
    }

    /// A wizard sitting at RouteAndDuration with an adult passenger.
    fn at_route_step() -> Wizard {
        let mut w = Wizard::new(1);
        w.set_full_name("  Nimal Perera ").unwrap();
        w.set_category(RiderCategory::Adult).unwrap();
        w.attach(id_photo()).unwrap();
        assert_eq!(w.advance_at(now()), Ok(StepKind::RouteAndDuration));
        w
    }

    #[test]
    fn happy_path_issues_record() {
        let mut w = at_route_step();
        w.set_start_date(date("2025-01-15")).unwrap();
        assert_eq!(w.advance_at(now()), Ok(StepKind::Payment));
        w.set_payment(PaymentMethod::Card).unwrap();
        assert_eq!(w.advance_at(now()), Ok(StepKind::Issued));

        let record = w.record().unwrap();
        assert_eq!(record.name, "Nimal Perera");
        assert_eq!(record.category, RiderCategory::Adult);
        assert_eq!(record.start_location, Station::Colombo);
        assert_eq!(record.end_location, Station::Galle);
        assert_eq!(record.start_date, date("2025-01-15"));
        assert_eq!(record.end_date, date("2025-01-21"));
        assert_eq!(record.valid_until, record.end_date);
        assert_eq!(record.price, Price::new(2000));
        assert_eq!(record.issued, date("2025-01-10"));
        assert_eq!(record.status, TicketStatus::Active);
        assert_eq!(record.created_by, 1);
        assert!(record.ticket_id.as_str().starts_with("SP"));
    }

    #[test]
    fn details_guards_in_order() {
        let mut w = Wizard::new(1);
        assert_eq!(w.advance_at(now()), Err(WizardError::MissingName));

        w.set_full_name("   ").unwrap();
        assert_eq!(w.advance_at(now()), Err(WizardError::MissingName));

        w.set_full_name("Kamal").unwrap();
        assert_eq!(w.advance_at(now()), Err(WizardError::MissingCategory));

        w.set_category(RiderCategory::Student).unwrap();
        w.attach(id_photo()).unwrap();
        assert_eq!(
            w.advance_at(now()),
            Err(WizardError::MissingDocument {
                kind: AttachmentKind::StudentDocument
            })
        );
        assert_eq!(w.kind(), StepKind::Details);

        w.attach(student_doc()).unwrap();
        assert_eq!(w.advance_at(now()), Ok(StepKind::RouteAndDuration));
    }

    #[test]
    fn pending_and_failed_documents_block() {
        let mut w = Wizard::new(1);
        w.set_full_name("Kamal").unwrap();
        w.set_category(RiderCategory::Adult).unwrap();

        w.attach(Attachment::pending(AttachmentKind::IdPhoto, "id.jpg"))
            .unwrap();
        assert_eq!(
            w.advance_at(now()),
            Err(WizardError::DocumentPending {
                kind: AttachmentKind::IdPhoto
            })
        );

        let mut broken = Attachment::pending(AttachmentKind::IdPhoto, "/nonexistent/id.jpg");
        broken.load();
        w.attach(broken).unwrap();
        assert!(matches!(
            w.advance_at(now()),
            Err(WizardError::DocumentFailed { .. })
        ));
    }

    #[test]
    fn same_endpoints_always_block() {
        for start in [None, Some(date("2025-01-15")), Some(date("2020-01-01"))] {
            let mut w = at_route_step();
            w.set_destination(Station::Colombo).unwrap();
            if let Some(start) = start {
                w.set_start_date(start).unwrap();
            }
            assert_eq!(
                w.advance_at(now()),
                Err(WizardError::SameEndpoints {
                    station: Station::Colombo
                })
            );
            assert_eq!(w.kind(), StepKind::RouteAndDuration);
        }
    }

    #[test]
    fn start_date_required_and_not_past() {
        let mut w = at_route_step();
        assert_eq!(w.advance_at(now()), Err(WizardError::MissingStartDate));

        w.set_start_date(date("2025-01-09")).unwrap();
        assert!(matches!(
            w.advance_at(now()),
            Err(WizardError::StartDateInPast { .. })
        ));

        w.set_start_date(date("2025-01-10")).unwrap();
        assert_eq!(w.advance_at(now()), Ok(StepKind::Payment));
    }

    #[test]
    fn payment_required() {
        let mut w = at_route_step();
        w.set_start_date(date("2025-01-15")).unwrap();
        w.advance_at(now()).unwrap();
        assert_eq!(w.advance_at(now()), Err(WizardError::MissingPayment));
        assert!(w.record().is_none());
    }

    #[test]
    fn end_date_follows_start_and_duration() {
        let mut w = at_route_step();
        assert_eq!(w.draft().end_date(), None);

        w.set_start_date(date("2025-01-15")).unwrap();
        assert_eq!(w.draft().end_date(), Some(date("2025-01-21")));

        w.set_duration(PassDuration::Month).unwrap();
        assert_eq!(w.draft().end_date(), Some(date("2025-02-14")));

        w.set_start_date(date("2025-03-01")).unwrap();
        assert_eq!(w.draft().end_date(), Some(date("2025-03-31")));
    }

    #[test]
    fn price_tracks_every_input() {
        let mut w = Wizard::new(1);
        assert_eq!(w.price(), Price::new(2000));
        w.set_duration(PassDuration::Month).unwrap();
        assert_eq!(w.price(), Price::new(8000));
        w.set_category(RiderCategory::Student).unwrap();
        assert_eq!(w.price(), Price::new(4000));
        w.set_destination(Station::Kalutara).unwrap();
        assert_eq!(w.price(), Price::new(2000));
    }

    #[test]
    fn back_keeps_entered_data() {
        let mut w = at_route_step();
        w.set_start_date(date("2025-01-15")).unwrap();
        w.set_destination(Station::Kandy).unwrap();
        w.advance_at(now()).unwrap();
        w.set_payment(PaymentMethod::EWallet).unwrap();

        assert_eq!(w.back(), Ok(StepKind::RouteAndDuration));
        assert_eq!(w.back(), Ok(StepKind::Details));
        assert_eq!(w.back(), Err(WizardError::AtFirstStep));

        let d = w.draft();
        assert_eq!(d.full_name(), "  Nimal Perera ");
        assert_eq!(d.destination(), Station::Kandy);
        assert_eq!(d.start_date(), Some(date("2025-01-15")));
        assert_eq!(d.payment(), Some(PaymentMethod::EWallet));

        w.advance_at(now()).unwrap();
        w.advance_at(now()).unwrap();
        assert_eq!(w.advance_at(now()), Ok(StepKind::Issued));
        assert_eq!(w.record().unwrap().price, Price::new(1800));
    }

    #[test]
    fn back_to_jumps_and_rejects_unreached() {
        let mut w = at_route_step();
        w.set_start_date(date("2025-01-15")).unwrap();
        w.advance_at(now()).unwrap();

        assert_eq!(
            w.back_to(StepKind::Issued),
            Err(WizardError::NotReached {
                target: StepKind::Issued
            })
        );
        w.back_to(StepKind::Details).unwrap();
        assert_eq!(w.kind(), StepKind::Details);
    }

    #[test]
    fn editing_earlier_field_rewinds() {
        let mut w = at_route_step();
        w.set_start_date(date("2025-01-15")).unwrap();
        w.advance_at(now()).unwrap();
        assert_eq!(w.kind(), StepKind::Payment);

        w.set_destination(Station::Colombo).unwrap();
        assert_eq!(w.kind(), StepKind::RouteAndDuration);

        w.set_category(RiderCategory::Student).unwrap();
        assert_eq!(w.kind(), StepKind::Details);
    }

    #[test]
    fn category_change_reprices_trip() {
        let mut w = at_route_step();
        w.set_start_date(date("2025-01-15")).unwrap();
        w.set_category(RiderCategory::Student).unwrap();
        w.attach(student_doc()).unwrap();
        w.advance_at(now()).unwrap();
        w.advance_at(now()).unwrap();
        match w.step() {
            Step::Payment { trip, .. } => assert_eq!(trip.price(), Price::new(1000)),
            other => panic!("expected Payment, got {other:?}"),
        }
    }

    #[test]
    fn issued_is_terminal_until_reset() {
        let mut w = at_route_step();
        w.set_start_date(date("2025-01-15")).unwrap();
        w.advance_at(now()).unwrap();
        w.set_payment(PaymentMethod::Card).unwrap();
        w.advance_at(now()).unwrap();

        assert_eq!(w.back(), Err(WizardError::AlreadyIssued));
        assert_eq!(w.advance_at(now()), Err(WizardError::AlreadyIssued));
        assert_eq!(w.set_full_name("x"), Err(WizardError::AlreadyIssued));
        assert!(w.record().is_some());

        w.reset();
        assert_eq!(w.kind(), StepKind::Details);
        assert!(w.record().is_none());
        assert_eq!(w.draft().full_name(), "");
        assert_eq!(w.draft().category(), None);
        assert_eq!(w.draft().origin(), Station::Colombo);
        assert_eq!(w.draft().destination(), Station::Galle);
        assert_eq!(w.draft().start_date(), None);
        assert_eq!(w.draft().payment(), None);
        assert!(w.draft().attachment(AttachmentKind::IdPhoto).is_none());
    }
}
