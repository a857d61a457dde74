//! Tangible and intangible fixed-asset notes.
//!
//! Both notes are a set of asset categories plus a `total` category, each a
//! schedule of cost and write-down movements (depreciation for tangible
//! assets, amortisation for intangible ones) ending in net book values. The
//! two differ only in their category names and the write-down key, so one
//! implementation serves both through [`AssetNote`].
use crate::balance_sheet::BalanceSheet;
use crate::enums::{NoteKind, Period};
use crate::notes::{
    Cost, IntangibleAssets, IntangibleAssetsCategory, TangibleAssets, TangibleAssetsCategory,
    WriteDown,
};
use crate::submission::NoteBody;

use super::presence::{check_text_length, require};
use super::reconcile::{cross_validate, net_present, sum_present, validate_aggregate_total};
use super::{DataError, ErrorKey, Errors, JsonPath, NoteValidator, ValidationContext};


/// One asset category's schedule.
pub trait AssetCategory {
    fn cost(&self) -> Option<&Cost>;
    fn write_down(&self) -> Option<&WriteDown>;
    fn net_book_value_current(&self) -> Option<i64>;
    fn net_book_value_previous(&self) -> Option<i64>;
}

impl AssetCategory for TangibleAssetsCategory {
    fn cost(&self) -> Option<&Cost> {
        self.cost.as_ref()
    }

    fn write_down(&self) -> Option<&WriteDown> {
        self.depreciation.as_ref()
    }

    fn net_book_value_current(&self) -> Option<i64> {
        self.net_book_value_at_end_of_current_period
    }

    fn net_book_value_previous(&self) -> Option<i64> {
        self.net_book_value_at_end_of_previous_period
    }
}

impl AssetCategory for IntangibleAssetsCategory {
    fn cost(&self) -> Option<&Cost> {
        self.cost.as_ref()
    }

    fn write_down(&self) -> Option<&WriteDown> {
        self.amortisation.as_ref()
    }

    fn net_book_value_current(&self) -> Option<i64> {
        self.net_book_value_at_end_of_current_period
    }

    fn net_book_value_previous(&self) -> Option<i64> {
        self.net_book_value_at_end_of_previous_period
    }
}

/// A fixed-asset note: named categories plus their `total`.
pub trait AssetNote {
    type Category: AssetCategory;

    const ROOT: &'static str;
    /// `depreciation` or `amortisation`.
    const WRITE_DOWN: &'static str;

    /// Every category except `total`, in wire order.
    fn categories(&self) -> Vec<(&'static str, Option<&Self::Category>)>;
    fn total(&self) -> Option<&Self::Category>;
    fn additional_information(&self) -> Option<&str>;
    /// The balance-sheet line the total net book values reconcile with.
    fn sheet_value(sheet: &BalanceSheet) -> Option<i64>;
}

impl AssetNote for TangibleAssets {
    type Category = TangibleAssetsCategory;
    const ROOT: &'static str = "tangible_assets";
    const WRITE_DOWN: &'static str = "depreciation";

    fn categories(&self) -> Vec<(&'static str, Option<&TangibleAssetsCategory>)> {
        vec![
            ("land_and_buildings", self.land_and_buildings.as_ref()),
            ("plant_and_machinery", self.plant_and_machinery.as_ref()),
            ("fixtures_and_fittings", self.fixtures_and_fittings.as_ref()),
            ("office_equipment", self.office_equipment.as_ref()),
            ("motor_vehicles", self.motor_vehicles.as_ref()),
        ]
    }

    fn total(&self) -> Option<&TangibleAssetsCategory> {
        self.total.as_ref()
    }

    fn additional_information(&self) -> Option<&str> {
        self.additional_information.as_deref()
    }

    fn sheet_value(sheet: &BalanceSheet) -> Option<i64> {
        sheet.tangible_fixed_assets()
    }
}

impl AssetNote for IntangibleAssets {
    type Category = IntangibleAssetsCategory;
    const ROOT: &'static str = "intangible_assets";
    const WRITE_DOWN: &'static str = "amortisation";

    fn categories(&self) -> Vec<(&'static str, Option<&IntangibleAssetsCategory>)> {
        vec![
            ("goodwill", self.goodwill.as_ref()),
            ("other_intangible_assets", self.other_intangible_assets.as_ref()),
        ]
    }

    fn total(&self) -> Option<&IntangibleAssetsCategory> {
        self.total.as_ref()
    }

    fn additional_information(&self) -> Option<&str> {
        self.additional_information.as_deref()
    }

    fn sheet_value(sheet: &BalanceSheet) -> Option<i64> {
        sheet.intangible_fixed_assets()
    }
}

// ---------------------------------------------------------------------------
// Flattened figures
// ---------------------------------------------------------------------------

const NBV_CURRENT: &str = "net_book_value_at_end_of_current_period";
const NBV_PREVIOUS: &str = "net_book_value_at_end_of_previous_period";

/// One numeric field of a category schedule.
#[derive(Debug, Clone, Copy)]
struct Figure {
    section: Option<&'static str>,
    field: &'static str,
    value: Option<i64>,
    /// Opening figures only exist for multiple-year filers.
    opening: bool,
}

impl Figure {
    fn path(&self, category: &JsonPath) -> JsonPath {
        match self.section {
            Some(section) => category.field(section).field(self.field),
            None => category.field(self.field),
        }
    }
}

fn figures<C: AssetCategory>(category: Option<&C>, write_down: &'static str) -> Vec<Figure> {
    let cost = category.and_then(C::cost);
    let wd = category.and_then(C::write_down);
    let fig = |section: Option<&'static str>,
               field: &'static str,
               value: Option<i64>,
               opening: bool| Figure {
        section,
        field,
        value,
        opening,
    };
    vec![
        fig(Some("cost"), "at_period_start", cost.and_then(|c| c.at_period_start), true),
        fig(Some("cost"), "additions", cost.and_then(|c| c.additions), false),
        fig(Some("cost"), "disposals", cost.and_then(|c| c.disposals), false),
        fig(Some("cost"), "revaluations", cost.and_then(|c| c.revaluations), false),
        fig(Some("cost"), "transfers", cost.and_then(|c| c.transfers), false),
        fig(Some("cost"), "at_period_end", cost.and_then(|c| c.at_period_end), false),
        fig(Some(write_down), "at_period_start", wd.and_then(|w| w.at_period_start), true),
        fig(Some(write_down), "charge_for_year", wd.and_then(|w| w.charge_for_year), false),
        fig(Some(write_down), "on_disposals", wd.and_then(|w| w.on_disposals), false),
        fig(
            Some(write_down),
            "other_adjustments",
            wd.and_then(|w| w.other_adjustments),
            false,
        ),
        fig(Some(write_down), "at_period_end", wd.and_then(|w| w.at_period_end), false),
        fig(None, NBV_CURRENT, category.and_then(C::net_book_value_current), false),
        fig(None, NBV_PREVIOUS, category.and_then(C::net_book_value_previous), true),
    ]
}

fn has_any(figures: &[Figure]) -> bool {
    figures.iter().any(|f| f.value.is_some())
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Movement arithmetic and mandatory closing figures of one category.
fn validate_category<C: AssetCategory>(
    category: &C,
    path: &JsonPath,
    write_down: &'static str,
    multiple_year: bool,
    errors: &mut Errors,
) {
    let figs = figures(Some(category), write_down);
    if !has_any(&figs) {
        return;
    }
    // A rejected opening figure is already reported; its roll-forward is
    // not checked as well.
    let rejected = |v: Option<i64>| !multiple_year && v.is_some();

    let cost = category.cost();
    if let Some(cost) = cost {
        let end_path = path.field("cost").field("at_period_end");
        let any = [
            cost.at_period_start,
            cost.additions,
            cost.disposals,
            cost.revaluations,
            cost.transfers,
            cost.at_period_end,
        ]
        .iter()
        .any(Option::is_some);
        if any
            && require(cost.at_period_end.is_some(), &end_path, errors)
            && !rejected(cost.at_period_start)
        {
            let expected = net_present(
                &[
                    cost.at_period_start,
                    cost.additions,
                    cost.revaluations,
                    cost.transfers,
                ],
                &[cost.disposals],
            );
            validate_aggregate_total(cost.at_period_end, expected, &end_path, errors);
        }
    }

    let wd = category.write_down();
    if let Some(wd) = wd {
        let end_path = path.field(write_down).field("at_period_end");
        let any = [
            wd.at_period_start,
            wd.charge_for_year,
            wd.on_disposals,
            wd.other_adjustments,
            wd.at_period_end,
        ]
        .iter()
        .any(Option::is_some);
        if any
            && require(wd.at_period_end.is_some(), &end_path, errors)
            && !rejected(wd.at_period_start)
        {
            let expected = net_present(
                &[
                    wd.at_period_start,
                    wd.charge_for_year,
                    wd.other_adjustments,
                ],
                &[wd.on_disposals],
            );
            validate_aggregate_total(wd.at_period_end, expected, &end_path, errors);
        }
    }

    let nbv_path = path.field(NBV_CURRENT);
    let nbv = category.net_book_value_current();
    if require(nbv.is_some(), &nbv_path, errors) {
        let expected = net_present(
            &[cost.and_then(|c| c.at_period_end)],
            &[wd.and_then(|w| w.at_period_end)],
        );
        validate_aggregate_total(nbv, expected, &nbv_path, errors);
    }

    if multiple_year {
        let expected = net_present(
            &[cost.and_then(|c| c.at_period_start)],
            &[wd.and_then(|w| w.at_period_start)],
        );
        validate_aggregate_total(
            category.net_book_value_previous(),
            expected,
            &path.field(NBV_PREVIOUS),
            errors,
        );
    } else {
        for fig in figs.iter().filter(|f| f.opening && f.value.is_some()) {
            errors.push(ErrorKey::InconsistentData, fig.path(path));
        }
    }
}

/// Every field of `total` must equal the sum of that field across the
/// other categories. Returns whether each net book value reconciled, as
/// `(current, previous)`.
fn validate_total<N: AssetNote>(
    note: &N,
    root: &JsonPath,
    multiple_year: bool,
    errors: &mut Errors,
) -> (bool, bool) {
    let categories = note.categories();
    let per_category: Vec<Vec<Figure>> = categories
        .iter()
        .map(|(_, c)| figures(*c, N::WRITE_DOWN))
        .collect();
    let total_figs = figures(note.total(), N::WRITE_DOWN);
    let path = root.field("total");

    if note.total().is_none() {
        let itemised = per_category.iter().any(|f| has_any(f.as_slice()));
        require(!itemised, &path, errors);
        return (!itemised, !itemised);
    }

    let mut nbv_ok = (true, true);
    for (i, total) in total_figs.iter().enumerate() {
        if total.opening && !multiple_year {
            continue;
        }
        let values: Vec<Option<i64>> = per_category.iter().map(|f| f[i].value).collect();
        let ok = validate_aggregate_total(
            total.value,
            sum_present(&values),
            &total.path(&path),
            errors,
        );
        if total.field == NBV_CURRENT {
            nbv_ok.0 = ok;
        } else if total.field == NBV_PREVIOUS {
            nbv_ok.1 = ok;
        }
    }
    nbv_ok
}

fn validate_asset_note<N: AssetNote>(
    note: &N,
    ctx: &ValidationContext<'_>,
) -> Result<Errors, DataError> {
    let filer = ctx.filer_classification(N::ROOT)?;
    let multiple_year = filer.is_multiple_year_filer;
    let current_value = ctx
        .current_balance_sheet(N::ROOT)?
        .as_ref()
        .and_then(N::sheet_value);
    let previous_value = if multiple_year {
        ctx.previous_balance_sheet(N::ROOT)?
            .as_ref()
            .and_then(N::sheet_value)
    } else {
        None
    };

    let root = JsonPath::root(N::ROOT);
    let mut errors = Errors::new();

    let note_has_data = note
        .categories()
        .into_iter()
        .chain(std::iter::once(("total", note.total())))
        .any(|(_, c)| has_any(&figures(c, N::WRITE_DOWN)))
        || note.additional_information().is_some();
    if !note_has_data && current_value.is_none() && previous_value.is_none() {
        errors.push(ErrorKey::EmptyResource, root);
        return Ok(errors);
    }

    for (name, category) in note.categories() {
        if let Some(category) = category {
            validate_category(
                category,
                &root.field(name),
                N::WRITE_DOWN,
                multiple_year,
                &mut errors,
            );
        }
    }

    let (current_ok, previous_ok) = validate_total(note, &root, multiple_year, &mut errors);
    let total_path = root.field("total");
    if !multiple_year {
        if let Some(total) = note.total() {
            let figs = figures(Some(total), N::WRITE_DOWN);
            for fig in figs.iter().filter(|f| f.opening && f.value.is_some()) {
                errors.push(ErrorKey::InconsistentData, fig.path(&total_path));
            }
        }
    }

    let total = note.total();
    if current_ok {
        cross_validate(
            total.and_then(<N::Category as AssetCategory>::net_book_value_current),
            current_value,
            Period::Current,
            &total_path.field(NBV_CURRENT),
            &mut errors,
        );
    }
    if multiple_year && previous_ok {
        cross_validate(
            total.and_then(<N::Category as AssetCategory>::net_book_value_previous),
            previous_value,
            Period::Previous,
            &total_path.field(NBV_PREVIOUS),
            &mut errors,
        );
    }

    check_text_length(
        note.additional_information(),
        ctx.config.max_text_length,
        &root.field("additional_information"),
        &mut errors,
    );

    tracing::debug!(note = N::ROOT, errors = errors.len(), "validated fixed asset note");
    Ok(errors)
}

/// `tangible-assets` note.
pub struct TangibleAssetsValidator;

impl NoteValidator for TangibleAssetsValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::TangibleAssets
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::TangibleAssets(assets) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_asset_note(assets, ctx)
    }
}

/// `intangible-assets` note.
pub struct IntangibleAssetsValidator;

impl NoteValidator for IntangibleAssetsValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::IntangibleAssets
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::IntangibleAssets(assets) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_asset_note(assets, ctx)
    }
}
