use leptos::prelude::*;

use super::types::NodeInfo;

/// Annotation table for the most recently clicked node. Each click replaces
/// the whole table.
#[component]
pub fn InfoPanel(#[prop(into)] info: Signal<Option<NodeInfo>>) -> impl IntoView {
	view! {
		<div class="info-panel">
			{move || info.get().map(|info| view! { <InfoTable info=info /> })}
		</div>
	}
}

#[component]
fn InfoTable(info: NodeInfo) -> impl IntoView {
	let legend = info.has_flagged().then(|| {
		view! {
			<tr class="legend">
				<td>{NodeInfo::LEGEND}</td>
			</tr>
		}
	});
	let links = info
		.tokens
		.into_iter()
		.enumerate()
		.map(|(i, token)| {
			let href = token.href();
			view! {
				{(i > 0).then_some(NodeInfo::SEPARATOR)}
				<a href=href target="_blank" class:flagged=token.flagged>
					{token.symbol}
				</a>
			}
		})
		.collect_view();

	view! {
		<table class="gene-table">
			<tr>
				<th>{NodeInfo::HEADER}</th>
			</tr>
			<tr>
				<td>{links}</td>
			</tr>
			{legend}
		</table>
	}
}
