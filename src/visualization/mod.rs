mod charts;
#[cfg(feature = "plot")]
mod plot;
mod tables;

pub use charts::{
    format_comparison_chart, format_yield_chart, print_comparison_chart, print_yield_chart,
    DEFAULT_CHART_ROWS,
};
#[cfg(feature = "plot")]
pub use plot::{plot_all_ratios, plot_biogas};
pub use tables::{
    format_mixture_table, print_mixture_table,
    format_ratio_info, print_ratio_info,
    format_ratio_list, print_ratio_list,
    format_simulation_summary, print_simulation_summary,
    format_substrate_table, print_substrate_table,
};
