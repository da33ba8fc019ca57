mod tests_filtering;
mod tests_persist;
mod tests_preorder;
mod tests_reverse_edges;
